pub mod errors;
pub mod query;
pub mod render;
pub mod store;
pub mod types;

pub use errors::*;
