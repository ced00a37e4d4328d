use crate::command::types::{
    ActingUser, EntityId, SortKey, StreamFilters, StreamMode, StreamRequest, ViewType,
};
use chrono::{DateTime, Utc};

pub struct StreamRequestFactory {
    inner: StreamRequest,
}

impl StreamRequestFactory {
    pub fn new() -> Self {
        Self {
            inner: StreamRequest::new(
                ViewType::Dashboard,
                ActingUser {
                    user_id: 1,
                    wall_id: 1,
                },
                10,
            ),
        }
    }

    pub fn dashboard() -> Self {
        Self::new()
    }

    pub fn community() -> Self {
        Self::new().with_view(ViewType::Community)
    }

    pub fn space(guid: &str) -> Self {
        Self::new().with_view(ViewType::Space).with_guid(guid)
    }

    pub fn user(guid: &str) -> Self {
        Self::new().with_view(ViewType::UserProfile).with_guid(guid)
    }

    pub fn with_view(mut self, view_type: ViewType) -> Self {
        self.inner.view_type = view_type;
        self
    }

    pub fn with_guid(mut self, guid: &str) -> Self {
        self.inner.target_guid = Some(guid.to_string());
        self
    }

    pub fn without_guid(mut self) -> Self {
        self.inner.target_guid = None;
        self
    }

    pub fn acting_as(mut self, acting_user: impl Into<ActingUser>) -> Self {
        self.inner.acting_user = acting_user.into();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.inner.page_limit = limit;
        self
    }

    pub fn with_cursor(mut self, from: EntityId) -> Self {
        self.inner.cursor_from = Some(from);
        self
    }

    pub fn sorted_by_update(mut self) -> Self {
        self.inner.sort_key = SortKey::UpdatedAt;
        self
    }

    pub fn with_filters(mut self, tokens: &[&str]) -> Self {
        let max_date = self.inner.filters.max_date;
        self.inner.filters = StreamFilters::from_tokens(tokens.iter().copied());
        self.inner.filters.max_date = max_date;
        self
    }

    pub fn with_max_date(mut self, max_date: DateTime<Utc>) -> Self {
        self.inner.filters.max_date = Some(max_date);
        self
    }

    pub fn activity_only(mut self) -> Self {
        self.inner.mode = StreamMode::ActivityOnly;
        self
    }

    pub fn create(self) -> StreamRequest {
        self.inner
    }
}
