use std::fmt::Write;

use crate::command::types::EntityId;

/// A value bound to a numbered placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Integer(i64),
    Text(String),
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Integer(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

/// Accumulates statement text and the parameters it references.
///
/// Placeholders are numbered (`?1`, `?2`, ...) in the order values are bound,
/// so a placeholder can be reused inside the same fragment.
#[derive(Debug, Default)]
pub struct SqlWriter {
    sql: String,
    params: Vec<SqlParam>,
}

impl SqlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a value and returns its placeholder.
    pub fn bind(&mut self, value: impl Into<SqlParam>) -> String {
        self.params.push(value.into());
        format!("?{}", self.params.len())
    }

    pub fn bind_id(&mut self, id: EntityId) -> String {
        self.bind(id)
    }

    pub fn push(&mut self, fragment: &str) {
        self.sql.push_str(fragment);
    }

    pub fn push_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        let _ = self.sql.write_fmt(args);
    }

    pub fn finish(self) -> (String, Vec<SqlParam>) {
        (self.sql, self.params)
    }
}
