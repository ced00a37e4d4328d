use tracing::warn;

use crate::command::types::EntityId;
use crate::engine::render::markup::{EntryRenderer, RenderContext};
use crate::engine::render::registry::ResolvedObjects;
use crate::engine::types::{ContentObject, FeedEntry};
use crate::shared::response::{DigestResponse, StreamResponse};

/// A fetched page with its objects resolved, in query order.
///
/// `counter` and `last_entry_id` describe every fetched row so the next page
/// starts after this one even when some rows could not be rendered.
#[derive(Debug, Default)]
pub struct StreamPage {
    pub entries: Vec<(FeedEntry, ContentObject)>,
    pub entry_ids: Vec<EntityId>,
    pub last_entry_id: Option<EntityId>,
    pub counter: usize,
}

impl StreamPage {
    pub fn assemble(fetched: Vec<FeedEntry>, objects: &ResolvedObjects) -> Self {
        let counter = fetched.len();
        let last_entry_id = fetched.last().map(|entry| entry.id);

        let mut entries = Vec::with_capacity(counter);
        for entry in fetched {
            match objects.get(&entry) {
                Some(object) => {
                    let object = object.clone();
                    entries.push((entry, object));
                }
                None => {
                    warn!(
                        target: "wall_stream::render",
                        entry_id = entry.id,
                        model = %entry.content.object_model,
                        object_id = entry.content.object_id,
                        "Skipping wall entry without a loadable object"
                    );
                }
            }
        }
        let entry_ids = entries.iter().map(|(entry, _)| entry.id).collect();

        Self {
            entries,
            entry_ids,
            last_entry_id,
            counter,
        }
    }

    pub fn to_stream_response(
        &self,
        renderer: &dyn EntryRenderer,
        ctx: &RenderContext,
    ) -> StreamResponse {
        let output = self
            .entries
            .iter()
            .map(|(entry, object)| renderer.render_wall_entry(ctx, entry, object))
            .collect::<String>();

        StreamResponse {
            output,
            last_entry_id: self.last_entry_id,
            counter: self.counter,
            entry_ids: self.entry_ids.clone(),
        }
    }

    pub fn to_digest(&self, renderer: &dyn EntryRenderer, ctx: &RenderContext) -> DigestResponse {
        let output = self
            .entries
            .iter()
            .map(|(entry, object)| renderer.render_mail_entry(ctx, entry, object))
            .collect::<String>();

        DigestResponse {
            output,
            counter: self.counter,
        }
    }
}
