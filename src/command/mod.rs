pub mod handlers;
pub mod parser;
pub mod types;

pub use types::{StreamRequest, ViewType};
