use crate::shared::response::render::Renderer;
use crate::shared::response::types::Response;
use serde::Serialize;
use tracing::error;

pub struct JsonRenderer;

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: u16,
    message: &'a str,
}

impl Renderer for JsonRenderer {
    fn render(&self, response: &Response) -> Vec<u8> {
        let result = match response {
            Response::Stream(page) => serde_json::to_vec(page),
            Response::Digest(digest) => serde_json::to_vec(digest),
            Response::Error { status, message } => serde_json::to_vec(&ErrorBody {
                status: status.code(),
                message,
            }),
        };

        let mut buf = match result {
            Ok(buf) => buf,
            Err(e) => {
                error!(target: "wall_stream::http", error = %e, "Failed to serialize response");
                b"{\"status\":500,\"message\":\"Failed to serialize JSON\"}".to_vec()
            }
        };
        buf.push(b'\n');
        buf
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
