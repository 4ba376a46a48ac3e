use sqlx::Sqlite;
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    I64(i64),
}

/// ===============================
/// WHERE clause container
/// ===============================
/// Conditions are ANDed together, values bind in push order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WhereClause {
    conditions: Vec<String>,
    values: Vec<SqlValue>,
}

impl WhereClause {
    pub fn push(&mut self, condition: impl Into<String>, values: impl IntoIterator<Item = SqlValue>) {
        self.conditions.push(condition.into());
        self.values.extend(values);
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Renders `WHERE a AND b`, or nothing when there are no conditions.
    pub fn to_sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }
}

/// ===============================
/// Bind values onto a query
/// ===============================
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    values: &[SqlValue],
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for value in values {
        query = match value {
            SqlValue::Text(v) => query.bind(v.clone()),
            SqlValue::I64(v) => query.bind(*v),
        };
    }
    query
}

/// Escapes LIKE wildcards so user text matches literally (`ESCAPE '\'`).
pub fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
