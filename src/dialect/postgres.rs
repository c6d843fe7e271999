use super::{Dialect, SqlDialect};
use crate::config::ConnectionProfile;
use crate::error::Result;

/// PostgreSQL dialect: double-quoted identifiers and numbered `$n` markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn kind(&self) -> Dialect {
        Dialect::Postgres
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident)
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn connection_string(&self, profile: &ConnectionProfile) -> Result<String> {
        Ok(format!(
            "host={} port={} user={} password={} dbname={} sslmode=disable",
            conn_value(profile.host()),
            profile.port(),
            conn_value(profile.user()),
            conn_value(profile.password()),
            conn_value(profile.database())
        ))
    }
}

/// Quotes a key/value connection string value when it would not survive
/// unquoted (empty, whitespace, quotes or backslashes).
fn conn_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '\\');
    if !needs_quotes {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}
