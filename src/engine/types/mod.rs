use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::command::types::EntityId;

/// Discriminator of activity records in `content.object_model`.
pub const ACTIVITY_MODEL: &str = "Activity";
/// Discriminator of posts in `content.object_model`.
pub const POST_MODEL: &str = "Post";

/// Wall owner discriminators in `wall.object_model`.
pub const SPACE_WALL_MODEL: &str = "Space";
pub const USER_WALL_MODEL: &str = "User";

/// `users.status` of an enabled account.
pub const USER_STATUS_ENABLED: i64 = 1;

/// Membership states stored in `user_space_membership.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MembershipStatus {
    Invited = 1,
    Applicant = 2,
    Member = 3,
}

impl MembershipStatus {
    pub fn code(&self) -> i64 {
        *self as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private = 0,
    Public = 1,
}

impl Visibility {
    pub fn code(&self) -> i64 {
        *self as i64
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Visibility::Private),
            1 => Some(Visibility::Public),
            _ => None,
        }
    }
}

/// Content envelope columns joined onto each wall entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentMeta {
    pub object_model: String,
    pub object_id: EntityId,
    pub created_by: EntityId,
    pub visibility: Visibility,
    pub archived: bool,
}

/// A wall entry as returned by the stream query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    pub id: EntityId,
    pub wall_id: EntityId,
    pub content_id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sticked: bool,
    pub content: ContentMeta,
}

impl FeedEntry {
    /// Key used to look the underlying object up in the object registry.
    pub fn object_key(&self) -> (&str, EntityId) {
        (self.content.object_model.as_str(), self.content.object_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub id: EntityId,
    pub guid: String,
    pub display_name: String,
}

/// The typed object behind a content envelope, reduced to what renderers need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentObject {
    pub model: String,
    pub id: EntityId,
    pub author: AuthorSummary,
    /// Text shown on the wall.
    pub wall_text: String,
    /// Text used by the mail digest.
    pub mail_text: String,
}
