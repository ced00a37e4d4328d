use std::collections::HashMap;
use std::sync::Arc;

use rusqlite::params_from_iter;
use tracing::debug;

use crate::command::types::EntityId;
use crate::engine::errors::StoreError;
use crate::engine::query::sql::SqlWriter;
use crate::engine::render::{ContentObjectLoader, ObjectRegistry};
use crate::engine::store::sqlite::{SqliteStore, to_value};
use crate::engine::types::{ACTIVITY_MODEL, AuthorSummary, ContentObject, POST_MODEL};

/// Row shape shared by both loaders: object id, author, then model specific text columns.
struct ObjectRow {
    id: EntityId,
    author: AuthorSummary,
    primary: String,
    secondary: Option<String>,
}

/// Loads `ids` of one model in a single statement. The author comes from the
/// content envelope's `created_by`.
fn load_rows(
    store: &SqliteStore,
    model: &str,
    table: &str,
    text_columns: (&str, &str),
    ids: &[EntityId],
) -> Result<Vec<ObjectRow>, StoreError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut w = SqlWriter::new();
    w.push_fmt(format_args!(
        "SELECT {table}.id, users.id, users.guid, users.display_name, {table}.{}, {table}.{} \
         FROM {table} \
         JOIN content ON content.object_id = {table}.id",
        text_columns.0, text_columns.1
    ));
    let model_ph = w.bind(model);
    w.push_fmt(format_args!(
        " AND content.object_model = {model_ph} \
         JOIN users ON users.id = content.created_by \
         WHERE {table}.id IN ("
    ));
    let placeholders: Vec<String> = ids.iter().map(|id| w.bind_id(*id)).collect();
    w.push(&placeholders.join(", "));
    w.push(")");
    let (sql, params) = w.finish();

    store.with_connection(|conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter().map(to_value)), |row| {
                Ok(ObjectRow {
                    id: row.get(0)?,
                    author: AuthorSummary {
                        id: row.get(1)?,
                        guid: row.get(2)?,
                        display_name: row.get(3)?,
                    },
                    primary: row.get(4)?,
                    secondary: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Loads [`POST_MODEL`] objects from the `post` table.
pub struct SqlitePostLoader {
    store: Arc<SqliteStore>,
}

impl SqlitePostLoader {
    pub fn new(store: Arc<SqliteStore>) -> Self {
        Self { store }
    }
}

impl ContentObjectLoader for SqlitePostLoader {
    fn load(&self, ids: &[EntityId]) -> Result<HashMap<EntityId, ContentObject>, StoreError> {
        let rows = load_rows(&self.store, POST_MODEL, "post", ("message", "url"), ids)?;
        debug!(target: "wall_stream::store", requested = ids.len(), loaded = rows.len(), "Loaded posts");

        Ok(rows
            .into_iter()
            .map(|row| {
                let wall_text = match &row.secondary {
                    Some(url) if !url.is_empty() => format!("{} {}", row.primary, url),
                    _ => row.primary.clone(),
                };
                let mail_text = format!("{}: {}", row.author.display_name, row.primary);
                let object = ContentObject {
                    model: POST_MODEL.to_string(),
                    id: row.id,
                    author: row.author,
                    wall_text,
                    mail_text,
                };
                (object.id, object)
            })
            .collect())
    }
}

/// Loads [`ACTIVITY_MODEL`] objects from the `activity` table.
pub struct SqliteActivityLoader {
    store: Arc<SqliteStore>,
}

impl SqliteActivityLoader {
    pub fn new(store: Arc<SqliteStore>) -> Self {
        Self { store }
    }
}

impl ContentObjectLoader for SqliteActivityLoader {
    fn load(&self, ids: &[EntityId]) -> Result<HashMap<EntityId, ContentObject>, StoreError> {
        let rows = load_rows(&self.store, ACTIVITY_MODEL, "activity", ("summary", "kind"), ids)?;
        debug!(target: "wall_stream::store", requested = ids.len(), loaded = rows.len(), "Loaded activities");

        Ok(rows
            .into_iter()
            .map(|row| {
                let mail_text = format!("{} {}", row.author.display_name, row.primary);
                let object = ContentObject {
                    model: ACTIVITY_MODEL.to_string(),
                    id: row.id,
                    author: row.author,
                    wall_text: row.primary,
                    mail_text,
                };
                (object.id, object)
            })
            .collect())
    }
}

/// Registry with the loaders for every model the SQLite store holds.
pub fn sqlite_registry(store: &Arc<SqliteStore>) -> ObjectRegistry {
    ObjectRegistry::new()
        .with_loader(POST_MODEL, Arc::new(SqlitePostLoader::new(Arc::clone(store))))
        .with_loader(
            ACTIVITY_MODEL,
            Arc::new(SqliteActivityLoader::new(Arc::clone(store))),
        )
}
