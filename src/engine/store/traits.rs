use crate::command::types::{ActingUser, EntityId};
use crate::engine::errors::StoreError;
use crate::engine::query::ExecutableQuery;
use crate::engine::types::FeedEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceTarget {
    pub id: EntityId,
    pub wall_id: EntityId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserTarget {
    pub id: EntityId,
    pub wall_id: EntityId,
    pub enabled: bool,
}

impl From<UserTarget> for ActingUser {
    fn from(user: UserTarget) -> Self {
        ActingUser {
            user_id: user.id,
            wall_id: user.wall_id,
        }
    }
}

/// Looks up the space or user a `guid` names. Read only.
pub trait TargetResolver {
    fn find_space(&self, guid: &str) -> Result<Option<SpaceTarget>, StoreError>;

    fn find_user(&self, guid: &str) -> Result<Option<UserTarget>, StoreError>;

    /// True only for full members, not invitations or applications.
    fn is_space_member(&self, space_id: EntityId, user_id: EntityId) -> Result<bool, StoreError>;
}

/// Persistence backend the stream runs against.
pub trait StreamStore: TargetResolver + Send + Sync {
    fn fetch_entries(&self, query: &ExecutableQuery) -> Result<Vec<FeedEntry>, StoreError>;
}
