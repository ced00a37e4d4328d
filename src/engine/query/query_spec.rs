use std::collections::BTreeSet;

use crate::command::types::{ActingUser, EntityId, SortKey, StreamRequest, ViewType};
use crate::engine::query::condition::{Condition, GroupKey, Join};

/// Typed predicate set of a stream query, not yet bound to SQL text.
///
/// Conditions and joins live in ordered sets: adding the same predicate twice
/// is a no-op and insertion order never shows up in the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub view_type: ViewType,
    pub acting_user: ActingUser,
    pub sort_key: SortKey,
    pub cursor_from: Option<EntityId>,
    pub page_limit: u32,
    conditions: BTreeSet<Condition>,
    joins: BTreeSet<Join>,
    group_by: Option<GroupKey>,
}

impl QuerySpec {
    pub fn for_request(request: &StreamRequest) -> Self {
        Self {
            view_type: request.view_type,
            acting_user: request.acting_user,
            sort_key: request.sort_key,
            cursor_from: request.cursor_from,
            page_limit: request.page_limit,
            conditions: BTreeSet::new(),
            joins: BTreeSet::new(),
            group_by: None,
        }
    }

    pub fn require(&mut self, condition: Condition) {
        self.conditions.insert(condition);
    }

    pub fn join(&mut self, join: Join) {
        self.joins.insert(join);
    }

    pub fn group_by(&mut self, key: GroupKey) {
        self.group_by = Some(key);
    }

    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter()
    }

    pub fn joins(&self) -> impl Iterator<Item = &Join> {
        self.joins.iter()
    }

    pub fn group_key(&self) -> Option<GroupKey> {
        self.group_by
    }

    pub fn has_condition(&self, condition: &Condition) -> bool {
        self.conditions.contains(condition)
    }

    pub fn has_join(&self, join: &Join) -> bool {
        self.joins.contains(join)
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }
}
