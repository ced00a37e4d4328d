use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::command::types::EntityId;
use crate::engine::errors::StoreError;
use crate::engine::types::{ContentObject, FeedEntry};

/// Batch loader for one content discriminator (`content.object_model`).
pub trait ContentObjectLoader: Send + Sync {
    /// Loads the objects among `ids` that exist. Missing ids are simply absent.
    fn load(&self, ids: &[EntityId]) -> Result<HashMap<EntityId, ContentObject>, StoreError>;
}

/// Maps discriminators to their loaders.
#[derive(Default, Clone)]
pub struct ObjectRegistry {
    loaders: HashMap<String, Arc<dyn ContentObjectLoader>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, model: &str, loader: Arc<dyn ContentObjectLoader>) {
        self.loaders.insert(model.to_string(), loader);
    }

    pub fn with_loader(mut self, model: &str, loader: Arc<dyn ContentObjectLoader>) -> Self {
        self.register(model, loader);
        self
    }

    pub fn has_loader(&self, model: &str) -> bool {
        self.loaders.contains_key(model)
    }

    /// Loads the objects behind `entries`, calling each loader once per page.
    pub fn resolve(&self, entries: &[FeedEntry]) -> Result<ResolvedObjects, StoreError> {
        let mut wanted: BTreeMap<&str, BTreeSet<EntityId>> = BTreeMap::new();
        for entry in entries {
            let (model, id) = entry.object_key();
            wanted.entry(model).or_default().insert(id);
        }

        let mut objects = HashMap::with_capacity(wanted.len());
        for (model, ids) in wanted {
            let Some(loader) = self.loaders.get(model) else {
                warn!(target: "wall_stream::render", model, count = ids.len(), "No loader registered for content model");
                continue;
            };
            let ids: Vec<EntityId> = ids.into_iter().collect();
            let loaded = loader.load(&ids)?;
            if tracing::enabled!(tracing::Level::DEBUG) {
                debug!(target: "wall_stream::render", model, requested = ids.len(), loaded = loaded.len(), "Resolved content objects");
            }
            objects.insert(model.to_string(), loaded);
        }

        Ok(ResolvedObjects { objects })
    }
}

/// Objects loaded for one page, keyed by discriminator and object id.
#[derive(Debug, Default)]
pub struct ResolvedObjects {
    objects: HashMap<String, HashMap<EntityId, ContentObject>>,
}

impl ResolvedObjects {
    pub fn get(&self, entry: &FeedEntry) -> Option<&ContentObject> {
        let (model, id) = entry.object_key();
        self.objects.get(model)?.get(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
