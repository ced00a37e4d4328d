pub mod json;
pub mod render;
pub mod types;

pub use types::{DigestResponse, Response, StatusCode, StreamResponse};

pub use json::JsonRenderer;
pub use render::Renderer;
