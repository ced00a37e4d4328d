use std::collections::HashMap;
use std::io::Write;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;

use wall_stream::command::handlers::StreamHandler;
use wall_stream::command::parser::{StreamDefaults, parse_request};
use wall_stream::engine::render::MarkupRenderer;
use wall_stream::engine::store::{SqliteStore, TargetResolver, sqlite_registry};
use wall_stream::logging;
use wall_stream::shared::config::model::{load_settings, load_settings_from};
use wall_stream::shared::response::{JsonRenderer, Renderer, Response};

#[derive(Parser)]
#[command(name = "stream_digest")]
#[command(about = "Print the mail digest of a wall stream as JSON", long_about = None)]
struct Args {
    /// Guid of the user the digest is built for
    #[arg(long)]
    user_guid: String,

    /// Stream type: dashboard, user, community or space
    #[arg(long = "type", default_value = "dashboard")]
    view_type: String,

    /// Target space or user guid for the space and user streams
    #[arg(long)]
    guid: Option<String>,

    /// Maximum number of entries
    #[arg(short, long)]
    limit: Option<u32>,

    /// Only entries created after this instant (RFC 3339, YYYY-MM-DD or epoch)
    #[arg(long)]
    since: Option<String>,

    /// Restrict the digest to activity records
    #[arg(long)]
    activity: bool,

    /// Configuration file, defaults to $WALL_STREAM_CONFIG or ./config
    #[arg(short, long)]
    config: Option<String>,
}

impl Args {
    fn to_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("type".to_string(), self.view_type.clone());
        if let Some(guid) = &self.guid {
            params.insert("guid".to_string(), guid.clone());
        }
        if let Some(limit) = self.limit {
            params.insert("limit".to_string(), limit.to_string());
        }
        if let Some(since) = &self.since {
            params.insert("max_date".to_string(), since.clone());
        }
        if self.activity {
            params.insert("mode".to_string(), "activity".to_string());
        }
        params
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_stderr("warn")?;

    let settings = match &args.config {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    }
    .context("Failed to load configuration")?;

    let store = std::sync::Arc::new(
        SqliteStore::open(&settings.store.database_path)
            .with_context(|| format!("Failed to open {}", settings.store.database_path))?,
    );

    let Some(user) = store.find_user(&args.user_guid)? else {
        bail!("Unknown user: {}", args.user_guid);
    };
    if !user.enabled {
        bail!("User is disabled: {}", args.user_guid);
    }

    let request = parse_request(
        &args.to_params(),
        user.into(),
        &StreamDefaults::from_settings(&settings),
    )?;
    info!(target: "wall_stream::digest", view = %request.view_type, limit = request.page_limit, "Building digest");

    let registry = sqlite_registry(&store);
    let handler = StreamHandler::new(store.as_ref(), &registry, &MarkupRenderer);
    let digest = handler.run_console(&request)?;

    let rendered = JsonRenderer.render(&Response::Digest(digest));
    std::io::stdout().write_all(&rendered)?;
    Ok(())
}
