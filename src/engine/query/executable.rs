use crate::command::types::{SortKey, ViewType};
use crate::engine::query::query_spec::QuerySpec;
use crate::engine::query::sql::{SqlParam, SqlWriter};

/// Columns read back for every entry, in row-mapping order.
pub const ENTRY_COLUMNS: &str = "wall_entry.id, wall_entry.wall_id, wall_entry.content_id, \
wall_entry.created_at, wall_entry.updated_at, content.object_model, content.object_id, \
content.created_by, content.visibility, content.archived, content.sticked";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    /// Sticky content ahead of the primary key.
    pub sticky_first: bool,
    pub key: SortKey,
}

impl OrderBy {
    fn clause(&self) -> String {
        let primary = match self.key {
            SortKey::CreatedAt => "wall_entry.id DESC",
            SortKey::UpdatedAt => "wall_entry.updated_at DESC, wall_entry.id DESC",
        };
        if self.sticky_first {
            format!("content.sticked DESC, {primary}")
        } else {
            primary.to_string()
        }
    }
}

/// A fully rendered, parameterized stream statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableQuery {
    sql: String,
    params: Vec<SqlParam>,
    pub view_type: ViewType,
    pub order_by: OrderBy,
    pub page_limit: u32,
    pub grouped: bool,
}

impl ExecutableQuery {
    pub(crate) fn render(spec: &QuerySpec, order_by: OrderBy) -> Self {
        let mut w = SqlWriter::new();
        let grouped = spec.group_key().is_some();

        // Under GROUP BY the bare columns come from the row holding MAX(id).
        w.push("SELECT ");
        w.push(ENTRY_COLUMNS);
        if grouped {
            w.push(", MAX(wall_entry.id) AS group_head");
        }
        w.push(
            " FROM wall_entry \
LEFT JOIN content ON wall_entry.content_id = content.id \
LEFT JOIN users creator ON creator.id = content.created_by",
        );

        let joins: Vec<String> = spec.joins().map(|join| join.render(&mut w)).collect();
        for join in joins {
            w.push(" ");
            w.push(&join);
        }

        let conditions: Vec<String> = spec
            .conditions()
            .filter(|condition| !(grouped && condition.is_cursor()))
            .map(|condition| condition.render(&mut w))
            .collect();
        if !conditions.is_empty() {
            w.push(" WHERE ");
            w.push(&conditions.join(" AND "));
        }

        if let Some(key) = spec.group_key() {
            w.push_fmt(format_args!(" GROUP BY {}", key.columns()));

            let having: Vec<String> = spec
                .conditions()
                .filter_map(|condition| condition.render_group_head(&mut w))
                .collect();
            if !having.is_empty() {
                w.push(" HAVING ");
                w.push(&having.join(" AND "));
            }
        }

        w.push_fmt(format_args!(" ORDER BY {}", order_by.clause()));
        let limit = w.bind(i64::from(spec.page_limit));
        w.push_fmt(format_args!(" LIMIT {limit}"));

        let (sql, params) = w.finish();
        Self {
            sql,
            params,
            view_type: spec.view_type,
            order_by,
            page_limit: spec.page_limit,
            grouped,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound values; index `n` belongs to placeholder `?{n + 1}`.
    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }
}
