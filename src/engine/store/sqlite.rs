use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use tracing::{debug, info};

use crate::command::types::EntityId;
use crate::engine::errors::StoreError;
use crate::engine::query::{ExecutableQuery, SqlParam};
use crate::engine::store::schema::ensure_schema;
#[cfg(any(test, feature = "seed"))]
use crate::engine::store::seed::StoreSeeder;
use crate::engine::store::traits::{SpaceTarget, StreamStore, TargetResolver, UserTarget};
use crate::engine::types::{
    ContentMeta, FeedEntry, MembershipStatus, USER_STATUS_ENABLED, Visibility,
};

/// SQLite-backed stream store. One connection, serialized behind a mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

/// Columns of one stream row before domain conversion.
struct EntryRow {
    id: EntityId,
    wall_id: EntityId,
    content_id: EntityId,
    created_at: i64,
    updated_at: i64,
    object_model: Option<String>,
    object_id: Option<EntityId>,
    created_by: Option<EntityId>,
    visibility: Option<i64>,
    archived: Option<i64>,
    sticked: Option<i64>,
}

impl SqliteStore {
    /// Opens (and creates if needed) the database at `path`. `:memory:` is supported.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        info!(target: "wall_stream::store", path, "Opening SQLite store");
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        ensure_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Runs `f` with exclusive access to the connection.
    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Fixture writer for tests and demos.
    #[cfg(any(test, feature = "seed"))]
    pub fn seeder(&self) -> StoreSeeder<'_> {
        StoreSeeder::new(self)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EntryRow> {
        Ok(EntryRow {
            id: row.get(0)?,
            wall_id: row.get(1)?,
            content_id: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
            object_model: row.get(5)?,
            object_id: row.get(6)?,
            created_by: row.get(7)?,
            visibility: row.get(8)?,
            archived: row.get(9)?,
            sticked: row.get(10)?,
        })
    }
}

impl TryFrom<EntryRow> for FeedEntry {
    type Error = StoreError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let missing = |column: &str| {
            StoreError::Corrupt(format!("wall entry {} has no content.{}", row.id, column))
        };
        let visibility_code = row.visibility.ok_or_else(|| missing("visibility"))?;
        let visibility = Visibility::from_code(visibility_code).ok_or_else(|| {
            StoreError::Corrupt(format!(
                "wall entry {} has unknown visibility {}",
                row.id, visibility_code
            ))
        })?;

        Ok(FeedEntry {
            id: row.id,
            wall_id: row.wall_id,
            content_id: row.content_id,
            created_at: epoch_to_utc(row.id, row.created_at)?,
            updated_at: epoch_to_utc(row.id, row.updated_at)?,
            sticked: row.sticked == Some(1),
            content: ContentMeta {
                object_model: row.object_model.ok_or_else(|| missing("object_model"))?,
                object_id: row.object_id.ok_or_else(|| missing("object_id"))?,
                created_by: row.created_by.ok_or_else(|| missing("created_by"))?,
                visibility,
                archived: row.archived == Some(1),
            },
        })
    }
}

fn epoch_to_utc(entry_id: EntityId, secs: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        StoreError::Corrupt(format!("wall entry {entry_id} has timestamp out of range: {secs}"))
    })
}

pub(crate) fn to_value(param: &SqlParam) -> Value {
    match param {
        SqlParam::Integer(i) => Value::Integer(*i),
        SqlParam::Text(s) => Value::Text(s.clone()),
    }
}

impl TargetResolver for SqliteStore {
    fn find_space(&self, guid: &str) -> Result<Option<SpaceTarget>, StoreError> {
        self.with_connection(|conn| {
            let space = conn
                .query_row(
                    "SELECT id, wall_id FROM spaces WHERE guid = ?1 AND wall_id IS NOT NULL",
                    params![guid],
                    |row| {
                        Ok(SpaceTarget {
                            id: row.get(0)?,
                            wall_id: row.get(1)?,
                        })
                    },
                )
                .optional()?;
            Ok(space)
        })
    }

    fn find_user(&self, guid: &str) -> Result<Option<UserTarget>, StoreError> {
        self.with_connection(|conn| {
            let user = conn
                .query_row(
                    "SELECT id, wall_id, status FROM users WHERE guid = ?1 AND wall_id IS NOT NULL",
                    params![guid],
                    |row| {
                        let status: i64 = row.get(2)?;
                        Ok(UserTarget {
                            id: row.get(0)?,
                            wall_id: row.get(1)?,
                            enabled: status == USER_STATUS_ENABLED,
                        })
                    },
                )
                .optional()?;
            Ok(user)
        })
    }

    fn is_space_member(&self, space_id: EntityId, user_id: EntityId) -> Result<bool, StoreError> {
        self.with_connection(|conn| {
            let status: Option<i64> = conn
                .query_row(
                    "SELECT status FROM user_space_membership WHERE space_id = ?1 AND user_id = ?2",
                    params![space_id, user_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(status == Some(MembershipStatus::Member.code()))
        })
    }
}

impl StreamStore for SqliteStore {
    fn fetch_entries(&self, query: &ExecutableQuery) -> Result<Vec<FeedEntry>, StoreError> {
        let rows = self.with_connection(|conn| {
            let mut stmt = conn.prepare(query.sql())?;
            let rows = stmt
                .query_map(
                    params_from_iter(query.params().iter().map(to_value)),
                    Self::map_row,
                )?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;

        let entries = rows
            .into_iter()
            .map(FeedEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            target: "wall_stream::store",
            view = %query.view_type,
            returned = entries.len(),
            "Fetched wall entries"
        );
        Ok(entries)
    }
}
