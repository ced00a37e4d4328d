use tracing::{debug, info};

use crate::command::types::StreamRequest;
use crate::engine::errors::StreamError;
use crate::engine::query::{ExecutableQuery, StreamQueryBuilder};
use crate::engine::render::{EntryRenderer, ObjectRegistry, RenderContext, StreamPage};
use crate::engine::store::StreamStore;
use crate::shared::response::{DigestResponse, StreamResponse};

/// Runs one stream request end to end: query, fetch, resolve, render.
pub struct StreamHandler<'a> {
    store: &'a dyn StreamStore,
    registry: &'a ObjectRegistry,
    renderer: &'a dyn EntryRenderer,
}

impl<'a> StreamHandler<'a> {
    pub fn new(
        store: &'a dyn StreamStore,
        registry: &'a ObjectRegistry,
        renderer: &'a dyn EntryRenderer,
    ) -> Self {
        Self {
            store,
            registry,
            renderer,
        }
    }

    /// Wall markup plus pagination data for the client.
    pub fn run(&self, request: &StreamRequest) -> Result<StreamResponse, StreamError> {
        let query = StreamQueryBuilder::build(request, self.store)?;
        let (page, ctx) = self.fetch_page(request, &query)?;
        let response = page.to_stream_response(self.renderer, &ctx);

        info!(
            target: "wall_stream::stream",
            view = %request.view_type,
            counter = response.counter,
            rendered = response.entry_ids.len(),
            "Stream page served"
        );
        Ok(response)
    }

    /// Mail digest text for the request, used by the digest job. Sticky entries
    /// follow the plain sort order.
    pub fn run_console(&self, request: &StreamRequest) -> Result<DigestResponse, StreamError> {
        let query = StreamQueryBuilder::build_console(request, self.store)?;
        let (page, ctx) = self.fetch_page(request, &query)?;
        let digest = page.to_digest(self.renderer, &ctx);

        info!(
            target: "wall_stream::stream",
            view = %request.view_type,
            counter = digest.counter,
            "Stream digest built"
        );
        Ok(digest)
    }

    fn fetch_page(
        &self,
        request: &StreamRequest,
        query: &ExecutableQuery,
    ) -> Result<(StreamPage, RenderContext), StreamError> {
        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                target: "wall_stream::stream",
                view = %request.view_type,
                limit = request.page_limit,
                filters = request.filters.tokens.len(),
                max_date = ?request.filters.max_date,
                "Running stream request"
            );
        }

        let entries = self.store.fetch_entries(query)?;
        let objects = self.registry.resolve(&entries)?;

        let ctx = RenderContext {
            view_type: request.view_type,
            mode: request.mode,
        };
        Ok((StreamPage::assemble(entries, &objects), ctx))
    }
}
