use crate::command::types::EntityId;
use crate::engine::query::sql::SqlWriter;
use crate::engine::types::{
    MembershipStatus, SPACE_WALL_MODEL, USER_STATUS_ENABLED, Visibility,
};

/// A single conjunctive predicate of the stream query.
///
/// Conditions are kept in an ordered set, so the derived ordering also fixes
/// the order in which they appear in the rendered WHERE clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Condition {
    /// Content created by an enabled account.
    CreatorEnabled,
    /// Wall entry id strictly below the cursor.
    IdBefore(EntityId),
    /// Updated before the cursor entry was updated.
    UpdatedBefore(EntityId),
    ObjectModelIs(String),
    ObjectModelIsNot(String),
    CreatedBy(EntityId),
    NotCreatedBy(EntityId),
    /// Walls of followed users and spaces, member spaces and the user's own wall.
    DashboardWalls { user_id: EntityId, own_wall_id: EntityId },
    /// Space wall entries need public content or full membership for private content.
    /// Requires [`Join::SpaceMembership`].
    SpaceContentVisible,
    WallIs(EntityId),
    /// Walls owned by enabled users.
    EnabledUserWalls,
    VisibilityIs(Visibility),
    /// Created strictly after the given epoch seconds.
    CreatedAfter(i64),
    /// Requires [`Join::Post`].
    PostHasFile,
    /// Requires [`Join::Post`].
    PostHasUrl,
    NotArchived,
    NotSticked,
    /// Requires [`Join::UserContent`].
    UserInvolved,
}

impl Condition {
    pub fn is_cursor(&self) -> bool {
        matches!(self, Condition::IdBefore(_) | Condition::UpdatedBefore(_))
    }

    /// Cursor predicates of a grouped query, compared against the group head in
    /// HAVING so a group already shown through its newest entry never comes back
    /// through an older one. `None` for non-cursor conditions.
    pub fn render_group_head(&self, w: &mut SqlWriter) -> Option<String> {
        match self {
            Condition::IdBefore(cursor) => {
                Some(format!("MAX(wall_entry.id) < {}", w.bind_id(*cursor)))
            }
            // Bare columns resolve to the MAX(wall_entry.id) row, as in the SELECT list.
            Condition::UpdatedBefore(cursor) => Some(format!(
                "wall_entry.updated_at < (SELECT cursor_entry.updated_at FROM wall_entry cursor_entry WHERE cursor_entry.id = {})",
                w.bind_id(*cursor)
            )),
            _ => None,
        }
    }

    pub fn render(&self, w: &mut SqlWriter) -> String {
        match self {
            Condition::CreatorEnabled => {
                format!("creator.status = {}", w.bind(USER_STATUS_ENABLED))
            }
            Condition::IdBefore(cursor) => {
                format!("wall_entry.id < {}", w.bind_id(*cursor))
            }
            Condition::UpdatedBefore(cursor) => format!(
                "wall_entry.updated_at < (SELECT cursor_entry.updated_at FROM wall_entry cursor_entry WHERE cursor_entry.id = {})",
                w.bind_id(*cursor)
            ),
            Condition::ObjectModelIs(model) => {
                format!("content.object_model = {}", w.bind(model.as_str()))
            }
            Condition::ObjectModelIsNot(model) => {
                format!("content.object_model != {}", w.bind(model.as_str()))
            }
            Condition::CreatedBy(user_id) => {
                format!("content.created_by = {}", w.bind_id(*user_id))
            }
            Condition::NotCreatedBy(user_id) => {
                format!("content.created_by != {}", w.bind_id(*user_id))
            }
            Condition::DashboardWalls {
                user_id,
                own_wall_id,
            } => {
                let user = w.bind_id(*user_id);
                let member = w.bind(MembershipStatus::Member.code());
                let own_wall = w.bind_id(*own_wall_id);
                format!(
                    "wall_entry.wall_id IN (\
SELECT uf.wall_id FROM user_follow LEFT JOIN users uf ON uf.id = user_follow.user_followed_id \
WHERE user_follow.user_follower_id = {user} AND uf.wall_id IS NOT NULL \
UNION SELECT sf.wall_id FROM space_follow LEFT JOIN spaces sf ON sf.id = space_follow.space_id \
WHERE space_follow.user_id = {user} AND sf.wall_id IS NOT NULL \
UNION SELECT sm.wall_id FROM user_space_membership LEFT JOIN spaces sm ON sm.id = user_space_membership.space_id \
WHERE user_space_membership.user_id = {user} AND user_space_membership.status = {member} AND sm.wall_id IS NOT NULL \
UNION SELECT {own_wall})"
                )
            }
            Condition::SpaceContentVisible => {
                let private = w.bind(Visibility::Private.code());
                let member = w.bind(MembershipStatus::Member.code());
                let public = w.bind(Visibility::Public.code());
                format!(
                    "(space_wall.id IS NULL \
OR (content.visibility = {private} AND space_membership.status = {member}) \
OR content.visibility = {public})"
                )
            }
            Condition::WallIs(wall_id) => {
                format!("wall_entry.wall_id = {}", w.bind_id(*wall_id))
            }
            Condition::EnabledUserWalls => format!(
                "wall_entry.wall_id IN (SELECT wall_id FROM users WHERE status = {} AND wall_id IS NOT NULL)",
                w.bind(USER_STATUS_ENABLED)
            ),
            Condition::VisibilityIs(visibility) => {
                format!("content.visibility = {}", w.bind(visibility.code()))
            }
            Condition::CreatedAfter(epoch) => {
                format!("wall_entry.created_at > {}", w.bind(*epoch))
            }
            Condition::PostHasFile => "post.file_id IS NOT NULL".to_string(),
            Condition::PostHasUrl => "post.url IS NOT NULL".to_string(),
            Condition::NotArchived => {
                "(content.archived != 1 OR content.archived IS NULL)".to_string()
            }
            Condition::NotSticked => {
                "(content.sticked != 1 OR content.sticked IS NULL)".to_string()
            }
            Condition::UserInvolved => "user_content.id IS NOT NULL".to_string(),
        }
    }
}

/// Optional LEFT JOINs on top of the always-present content and creator joins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Join {
    /// Space wall of the entry plus the acting user's full membership in it.
    SpaceMembership { user_id: EntityId },
    Post,
    UserContent { user_id: EntityId },
}

impl Join {
    pub fn render(&self, w: &mut SqlWriter) -> String {
        match self {
            Join::SpaceMembership { user_id } => {
                let space_model = w.bind(SPACE_WALL_MODEL);
                let user = w.bind_id(*user_id);
                let member = w.bind(MembershipStatus::Member.code());
                format!(
                    "LEFT JOIN wall space_wall ON space_wall.id = wall_entry.wall_id AND space_wall.object_model = {space_model} \
LEFT JOIN user_space_membership space_membership ON space_membership.space_id = space_wall.object_id \
AND space_membership.user_id = {user} AND space_membership.status = {member}"
                )
            }
            Join::Post => format!(
                "LEFT JOIN post ON content.object_id = post.id AND content.object_model = {}",
                w.bind(crate::engine::types::POST_MODEL)
            ),
            Join::UserContent { user_id } => format!(
                "LEFT JOIN user_content ON content.object_model = user_content.object_model \
AND content.object_id = user_content.object_id AND user_content.user_id = {}",
                w.bind_id(*user_id)
            ),
        }
    }
}

/// Columns entries are collapsed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// One row per underlying object, represented by its newest entry.
    ContentObject,
}

impl GroupKey {
    pub fn columns(&self) -> &'static str {
        match self {
            GroupKey::ContentObject => "content.object_model, content.object_id",
        }
    }
}
