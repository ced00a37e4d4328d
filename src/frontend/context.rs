use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::command::parser::StreamDefaults;
use crate::engine::render::{MarkupRenderer, ObjectRegistry};
use crate::engine::store::{SqliteStore, sqlite_registry};
use crate::shared::config::CONFIG;

pub struct FrontendContext {
    pub store: Arc<SqliteStore>,
    pub registry: Arc<ObjectRegistry>,
    pub renderer: MarkupRenderer,
    pub defaults: StreamDefaults,
}

impl FrontendContext {
    pub fn new(store: Arc<SqliteStore>, defaults: StreamDefaults) -> Arc<Self> {
        let registry = Arc::new(sqlite_registry(&store));
        Arc::new(Self {
            store,
            registry,
            renderer: MarkupRenderer,
            defaults,
        })
    }

    pub fn from_config() -> anyhow::Result<Arc<Self>> {
        let path = &CONFIG.store.database_path;
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let store = Arc::new(SqliteStore::open(path)?);
        let defaults = StreamDefaults::from_settings(&CONFIG);
        info!(
            target: "wall_stream::http",
            database = %path,
            default_limit = defaults.default_limit,
            max_limit = ?defaults.max_limit,
            "Frontend context ready"
        );
        Ok(Self::new(store, defaults))
    }
}
