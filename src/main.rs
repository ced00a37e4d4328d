use tracing::info;
use wall_stream::frontend::start_all;
use wall_stream::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init()?;

    info!(target: "wall_stream::main", "Wall stream is starting...");
    start_all().await?;

    Ok(())
}
