use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::frontend::context::FrontendContext;
use crate::shared::config::CONFIG;

use super::handler::handle_request;

pub async fn run_http_server(ctx: Arc<FrontendContext>) -> anyhow::Result<()> {
    let addr: SocketAddr = CONFIG.server.http_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    let keep_alive = CONFIG.server.keep_alive;

    info!(target: "wall_stream::http", keep_alive, "HTTP server running at http://{addr}/stream");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let accept_result = tokio::select! {
            result = listener.accept() => result,
            _ = &mut shutdown => {
                info!(target: "wall_stream::http", "HTTP server shutting down, stopping accept loop");
                break;
            }
        };

        let (stream, peer_addr) = match accept_result {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(target: "wall_stream::http", "Failed to accept HTTP connection: {}", e);
                continue;
            }
        };
        let io = TokioIo::new(stream);
        let ctx = Arc::clone(&ctx);

        tokio::spawn(async move {
            let mut builder = hyper::server::conn::http1::Builder::new();
            builder.keep_alive(keep_alive);

            if let Err(err) = builder
                .serve_connection(
                    io,
                    service_fn(move |req| handle_request(req, Arc::clone(&ctx))),
                )
                .await
            {
                let text = err.to_string();
                // Clients hanging up is routine.
                if !text.contains("connection closed")
                    && !text.contains("broken pipe")
                    && !text.contains("Connection reset")
                {
                    warn!(target: "wall_stream::http", %peer_addr, "Error serving connection: {:?}", err);
                }
            }
        });
    }

    info!(target: "wall_stream::http", "HTTP server shutdown complete");
    Ok(())
}
