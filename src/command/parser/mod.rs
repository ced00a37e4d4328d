pub mod error;
pub mod request;

pub use error::ParseError;
pub use request::{StreamDefaults, parse_request};
