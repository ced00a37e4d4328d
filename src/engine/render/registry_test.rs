use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::command::types::EntityId;
use crate::engine::errors::StoreError;
use crate::engine::render::{ContentObjectLoader, ObjectRegistry};
use crate::engine::types::{ACTIVITY_MODEL, ContentObject, POST_MODEL};
use crate::test_helpers::factories::{ContentObjectFactory, FeedEntryFactory};

/// Serves objects for a fixed id set and counts how often it is asked.
struct CountingLoader {
    model: &'static str,
    known: Vec<EntityId>,
    calls: AtomicUsize,
    last_ids: parking_lot::Mutex<Vec<EntityId>>,
}

impl CountingLoader {
    fn new(model: &'static str, known: &[EntityId]) -> Arc<Self> {
        Arc::new(Self {
            model,
            known: known.to_vec(),
            calls: AtomicUsize::new(0),
            last_ids: parking_lot::Mutex::new(Vec::new()),
        })
    }
}

impl ContentObjectLoader for CountingLoader {
    fn load(&self, ids: &[EntityId]) -> Result<HashMap<EntityId, ContentObject>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_ids.lock() = ids.to_vec();
        Ok(ids
            .iter()
            .filter(|id| self.known.contains(id))
            .map(|id| {
                let object = ContentObjectFactory::new()
                    .with_model(self.model)
                    .with_id(*id)
                    .create();
                (*id, object)
            })
            .collect())
    }
}

struct FailingLoader;

impl ContentObjectLoader for FailingLoader {
    fn load(&self, _ids: &[EntityId]) -> Result<HashMap<EntityId, ContentObject>, StoreError> {
        Err(StoreError::Corrupt("boom".into()))
    }
}

#[test]
fn test_resolve_calls_each_loader_once_with_deduplicated_ids() {
    let posts = CountingLoader::new(POST_MODEL, &[1, 2]);
    let activities = CountingLoader::new(ACTIVITY_MODEL, &[7]);
    let registry = ObjectRegistry::new()
        .with_loader(POST_MODEL, posts.clone())
        .with_loader(ACTIVITY_MODEL, activities.clone());

    let entries = vec![
        FeedEntryFactory::new().with_id(10).with_object(POST_MODEL, 2).create(),
        FeedEntryFactory::new().with_id(9).with_object(ACTIVITY_MODEL, 7).create(),
        FeedEntryFactory::new().with_id(8).with_object(POST_MODEL, 1).create(),
        FeedEntryFactory::new().with_id(7).with_object(POST_MODEL, 2).create(),
    ];

    let resolved = registry.resolve(&entries).unwrap();

    assert_eq!(posts.calls.load(Ordering::SeqCst), 1);
    assert_eq!(activities.calls.load(Ordering::SeqCst), 1);
    assert_eq!(*posts.last_ids.lock(), vec![1, 2]);
    assert_eq!(resolved.len(), 3);
    for entry in &entries {
        let object = resolved.get(entry).expect("object resolved");
        assert_eq!(object.model, entry.content.object_model);
        assert_eq!(object.id, entry.content.object_id);
    }
}

#[test]
fn test_unregistered_model_and_missing_object_are_absent() {
    let registry = ObjectRegistry::new().with_loader(POST_MODEL, CountingLoader::new(POST_MODEL, &[1]));
    assert!(registry.has_loader(POST_MODEL));
    assert!(!registry.has_loader("Poll"));

    let poll = FeedEntryFactory::new().with_object("Poll", 1).create();
    let gone = FeedEntryFactory::new().with_object(POST_MODEL, 5).create();

    let resolved = registry.resolve(&[poll.clone(), gone.clone()]).unwrap();

    assert!(resolved.get(&poll).is_none());
    assert!(resolved.get(&gone).is_none());
    assert!(resolved.is_empty());
}

#[test]
fn test_empty_page_calls_no_loader() {
    let posts = CountingLoader::new(POST_MODEL, &[]);
    let registry = ObjectRegistry::new().with_loader(POST_MODEL, posts.clone());

    let resolved = registry.resolve(&[]).unwrap();

    assert!(resolved.is_empty());
    assert_eq!(posts.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_loader_error_propagates() {
    let registry = ObjectRegistry::new().with_loader(POST_MODEL, Arc::new(FailingLoader));
    let entry = FeedEntryFactory::new().create();

    let err = registry.resolve(&[entry]).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));
}
