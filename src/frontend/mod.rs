pub mod context;
pub mod http;

use context::FrontendContext;
use std::sync::Arc;

pub async fn start_all() -> anyhow::Result<()> {
    let ctx = FrontendContext::from_config()?;
    http::listener::run_http_server(Arc::clone(&ctx)).await
}
