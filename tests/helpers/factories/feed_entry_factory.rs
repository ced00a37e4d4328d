use crate::command::types::EntityId;
use crate::engine::types::{AuthorSummary, ContentMeta, ContentObject, FeedEntry, POST_MODEL, Visibility};
use chrono::{DateTime, Utc};

pub struct FeedEntryFactory {
    inner: FeedEntry,
}

impl FeedEntryFactory {
    pub fn new() -> Self {
        let at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
        Self {
            inner: FeedEntry {
                id: 1,
                wall_id: 1,
                content_id: 1,
                created_at: at,
                updated_at: at,
                sticked: false,
                content: ContentMeta {
                    object_model: POST_MODEL.to_string(),
                    object_id: 1,
                    created_by: 1,
                    visibility: Visibility::Public,
                    archived: false,
                },
            },
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.inner.id = id;
        self
    }

    pub fn with_object(mut self, model: &str, object_id: EntityId) -> Self {
        self.inner.content.object_model = model.to_string();
        self.inner.content.object_id = object_id;
        self
    }

    pub fn sticked(mut self) -> Self {
        self.inner.sticked = true;
        self
    }

    pub fn create(self) -> FeedEntry {
        self.inner
    }
}

pub struct ContentObjectFactory {
    inner: ContentObject,
}

impl ContentObjectFactory {
    pub fn new() -> Self {
        Self {
            inner: ContentObject {
                model: POST_MODEL.to_string(),
                id: 1,
                author: AuthorSummary {
                    id: 1,
                    guid: "bob-guid".into(),
                    display_name: "Bob".into(),
                },
                wall_text: "hello".into(),
                mail_text: "Bob: hello".into(),
            },
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.inner.id = id;
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.inner.model = model.to_string();
        self
    }

    pub fn with_author(mut self, guid: &str, display_name: &str) -> Self {
        self.inner.author.guid = guid.to_string();
        self.inner.author.display_name = display_name.to_string();
        self
    }

    pub fn with_text(mut self, wall_text: &str, mail_text: &str) -> Self {
        self.inner.wall_text = wall_text.to_string();
        self.inner.mail_text = mail_text.to_string();
        self
    }

    pub fn create(self) -> ContentObject {
        self.inner
    }
}
