use std::cell::Cell;

use rusqlite::{Connection, params};

use crate::command::types::EntityId;
use crate::engine::errors::StoreError;
use crate::engine::store::sqlite::SqliteStore;
use crate::engine::store::traits::{SpaceTarget, UserTarget};
use crate::engine::types::{
    ACTIVITY_MODEL, MembershipStatus, POST_MODEL, SPACE_WALL_MODEL, USER_STATUS_ENABLED,
    USER_WALL_MODEL, Visibility,
};

/// Options for a seeded post.
#[derive(Debug, Clone)]
pub struct PostSeed {
    pub message: String,
    pub url: Option<String>,
    pub file_id: Option<i64>,
    pub visibility: Visibility,
    pub archived: bool,
    pub sticked: bool,
}

impl PostSeed {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            url: None,
            file_id: None,
            visibility: Visibility::Public,
            archived: false,
            sticked: false,
        }
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_file(mut self, file_id: i64) -> Self {
        self.file_id = Some(file_id);
        self
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    pub fn sticked(mut self) -> Self {
        self.sticked = true;
        self
    }
}

/// Ids of a seeded content object and the wall entry that posted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededEntry {
    pub entry_id: EntityId,
    pub content_id: EntityId,
    pub object_id: EntityId,
}

/// Writes users, spaces, relations and wall content for demos and tests.
///
/// Entry timestamps come from an internal clock that advances one second per
/// write, starting after the newest timestamp already stored, so creation
/// order and id order agree.
pub struct StoreSeeder<'a> {
    store: &'a SqliteStore,
    clock: Cell<Option<i64>>,
}

const CLOCK_START: i64 = 1_700_000_000;

impl<'a> StoreSeeder<'a> {
    pub(crate) fn new(store: &'a SqliteStore) -> Self {
        Self {
            store,
            clock: Cell::new(None),
        }
    }

    fn tick(&self) -> Result<i64, StoreError> {
        let last = match self.clock.get() {
            Some(last) => last,
            None => self.store.with_connection(|conn| {
                let newest: Option<i64> = conn.query_row(
                    "SELECT MAX(updated_at) FROM wall_entry",
                    [],
                    |row| row.get(0),
                )?;
                Ok(newest.unwrap_or(CLOCK_START).max(CLOCK_START))
            })?,
        };
        let now = last + 1;
        self.clock.set(Some(now));
        Ok(now)
    }

    fn create_wall(conn: &Connection, model: &str) -> Result<EntityId, StoreError> {
        conn.execute(
            "INSERT INTO wall (object_model, object_id) VALUES (?1, 0)",
            params![model],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn user(&self, guid: &str, display_name: &str) -> Result<UserTarget, StoreError> {
        self.user_with_status(guid, display_name, USER_STATUS_ENABLED)
    }

    pub fn user_with_status(
        &self,
        guid: &str,
        display_name: &str,
        status: i64,
    ) -> Result<UserTarget, StoreError> {
        self.store.with_connection(|conn| {
            let wall_id = Self::create_wall(conn, USER_WALL_MODEL)?;
            conn.execute(
                "INSERT INTO users (guid, display_name, status, wall_id) VALUES (?1, ?2, ?3, ?4)",
                params![guid, display_name, status, wall_id],
            )?;
            let id = conn.last_insert_rowid();
            conn.execute(
                "UPDATE wall SET object_id = ?1 WHERE id = ?2",
                params![id, wall_id],
            )?;
            Ok(UserTarget {
                id,
                wall_id,
                enabled: status == USER_STATUS_ENABLED,
            })
        })
    }

    pub fn space(&self, guid: &str, name: &str) -> Result<SpaceTarget, StoreError> {
        self.store.with_connection(|conn| {
            let wall_id = Self::create_wall(conn, SPACE_WALL_MODEL)?;
            conn.execute(
                "INSERT INTO spaces (guid, name, wall_id) VALUES (?1, ?2, ?3)",
                params![guid, name, wall_id],
            )?;
            let id = conn.last_insert_rowid();
            conn.execute(
                "UPDATE wall SET object_id = ?1 WHERE id = ?2",
                params![id, wall_id],
            )?;
            Ok(SpaceTarget { id, wall_id })
        })
    }

    pub fn membership(
        &self,
        space: &SpaceTarget,
        user: &UserTarget,
        status: MembershipStatus,
    ) -> Result<(), StoreError> {
        self.store.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO user_space_membership (space_id, user_id, status) VALUES (?1, ?2, ?3)",
                params![space.id, user.id, status.code()],
            )?;
            Ok(())
        })
    }

    pub fn follow_user(&self, follower: &UserTarget, followed: &UserTarget) -> Result<(), StoreError> {
        self.store.with_connection(|conn| {
            conn.execute(
                "INSERT INTO user_follow (user_follower_id, user_followed_id) VALUES (?1, ?2)",
                params![follower.id, followed.id],
            )?;
            Ok(())
        })
    }

    pub fn follow_space(&self, user: &UserTarget, space: &SpaceTarget) -> Result<(), StoreError> {
        self.store.with_connection(|conn| {
            conn.execute(
                "INSERT INTO space_follow (user_id, space_id) VALUES (?1, ?2)",
                params![user.id, space.id],
            )?;
            Ok(())
        })
    }

    /// Creates a post on `wall_id` authored by `author`.
    pub fn post(
        &self,
        wall_id: EntityId,
        author: &UserTarget,
        post: PostSeed,
    ) -> Result<SeededEntry, StoreError> {
        let at = self.tick()?;
        self.store.with_connection(|conn| {
            conn.execute(
                "INSERT INTO post (message, url, file_id) VALUES (?1, ?2, ?3)",
                params![post.message, post.url, post.file_id],
            )?;
            let object_id = conn.last_insert_rowid();
            let content_id = Self::insert_content(
                conn,
                POST_MODEL,
                object_id,
                author.id,
                post.visibility,
                post.archived,
                post.sticked,
            )?;
            let entry_id = Self::insert_entry(conn, wall_id, content_id, at)?;
            Ok(SeededEntry {
                entry_id,
                content_id,
                object_id,
            })
        })
    }

    /// Creates an activity record on `wall_id` caused by `actor`.
    pub fn activity(
        &self,
        wall_id: EntityId,
        actor: &UserTarget,
        kind: &str,
        summary: &str,
        visibility: Visibility,
    ) -> Result<SeededEntry, StoreError> {
        let at = self.tick()?;
        self.store.with_connection(|conn| {
            conn.execute(
                "INSERT INTO activity (kind, summary) VALUES (?1, ?2)",
                params![kind, summary],
            )?;
            let object_id = conn.last_insert_rowid();
            let content_id = Self::insert_content(
                conn,
                ACTIVITY_MODEL,
                object_id,
                actor.id,
                visibility,
                false,
                false,
            )?;
            let entry_id = Self::insert_entry(conn, wall_id, content_id, at)?;
            Ok(SeededEntry {
                entry_id,
                content_id,
                object_id,
            })
        })
    }

    /// Posts existing content onto another wall, as a share does.
    pub fn repost(&self, wall_id: EntityId, content_id: EntityId) -> Result<EntityId, StoreError> {
        let at = self.tick()?;
        self.store
            .with_connection(|conn| Self::insert_entry(conn, wall_id, content_id, at))
    }

    /// Bumps an entry's `updated_at` to the seeder clock.
    pub fn touch(&self, entry_id: EntityId) -> Result<(), StoreError> {
        let at = self.tick()?;
        self.store.with_connection(|conn| {
            conn.execute(
                "UPDATE wall_entry SET updated_at = ?1 WHERE id = ?2",
                params![at, entry_id],
            )?;
            Ok(())
        })
    }

    /// Marks `user` as involved with a content object (commented, liked, mentioned).
    pub fn involve(
        &self,
        user: &UserTarget,
        object_model: &str,
        object_id: EntityId,
    ) -> Result<(), StoreError> {
        self.store.with_connection(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO user_content (user_id, object_model, object_id) VALUES (?1, ?2, ?3)",
                params![user.id, object_model, object_id],
            )?;
            Ok(())
        })
    }

    fn insert_content(
        conn: &Connection,
        object_model: &str,
        object_id: EntityId,
        created_by: EntityId,
        visibility: Visibility,
        archived: bool,
        sticked: bool,
    ) -> Result<EntityId, StoreError> {
        conn.execute(
            "INSERT INTO content (object_model, object_id, created_by, visibility, archived, sticked)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                object_model,
                object_id,
                created_by,
                visibility.code(),
                i64::from(archived),
                i64::from(sticked)
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn insert_entry(
        conn: &Connection,
        wall_id: EntityId,
        content_id: EntityId,
        at: i64,
    ) -> Result<EntityId, StoreError> {
        conn.execute(
            "INSERT INTO wall_entry (wall_id, content_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![wall_id, content_id, at],
        )?;
        Ok(conn.last_insert_rowid())
    }
}
