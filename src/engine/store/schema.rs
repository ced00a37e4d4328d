use rusqlite::Connection;
use tracing::debug;

use crate::engine::errors::StoreError;

/// Tables the stream reads. Timestamps are epoch seconds.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS wall (
    id INTEGER PRIMARY KEY,
    object_model TEXT NOT NULL,
    object_id INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    guid TEXT NOT NULL UNIQUE,
    display_name TEXT NOT NULL,
    status INTEGER NOT NULL DEFAULT 1,
    wall_id INTEGER REFERENCES wall(id)
);

CREATE TABLE IF NOT EXISTS spaces (
    id INTEGER PRIMARY KEY,
    guid TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    wall_id INTEGER REFERENCES wall(id)
);

CREATE TABLE IF NOT EXISTS content (
    id INTEGER PRIMARY KEY,
    object_model TEXT NOT NULL,
    object_id INTEGER NOT NULL,
    created_by INTEGER NOT NULL,
    visibility INTEGER NOT NULL DEFAULT 0,
    archived INTEGER,
    sticked INTEGER,
    UNIQUE (object_model, object_id)
);

CREATE TABLE IF NOT EXISTS wall_entry (
    id INTEGER PRIMARY KEY,
    wall_id INTEGER NOT NULL REFERENCES wall(id),
    content_id INTEGER NOT NULL REFERENCES content(id),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_wall_entry_wall ON wall_entry (wall_id, id);
CREATE INDEX IF NOT EXISTS idx_wall_entry_updated ON wall_entry (updated_at);

CREATE TABLE IF NOT EXISTS post (
    id INTEGER PRIMARY KEY,
    message TEXT NOT NULL,
    url TEXT,
    file_id INTEGER
);

CREATE TABLE IF NOT EXISTS activity (
    id INTEGER PRIMARY KEY,
    kind TEXT NOT NULL,
    summary TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_follow (
    id INTEGER PRIMARY KEY,
    user_follower_id INTEGER NOT NULL,
    user_followed_id INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS space_follow (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    space_id INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS user_space_membership (
    space_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    status INTEGER NOT NULL,
    PRIMARY KEY (space_id, user_id)
);

CREATE TABLE IF NOT EXISTS user_content (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    object_model TEXT NOT NULL,
    object_id INTEGER NOT NULL,
    UNIQUE (user_id, object_model, object_id)
);
";

pub fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA)?;
    debug!(target: "wall_stream::store", "Schema ready");
    Ok(())
}
