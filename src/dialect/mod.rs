//! SQL dialect strategies.
//!
//! The two supported dialects differ in identifier quoting, placeholder
//! syntax and connection string format. [`Dialect`] is the configuration tag;
//! [`SqlDialect`] is the strategy selected from it once per helper.

mod mysql;
mod postgres;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConnectionProfile;
use crate::error::{Result, SqlHelperError};

pub use self::mysql::MySqlDialect;
pub use self::postgres::PostgresDialect;

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL - backtick quoting, `?` placeholders
    MySql,
    /// PostgreSQL - double-quote quoting, `$1, $2, ...` placeholders
    #[serde(alias = "postgresql")]
    Postgres,
}

impl Dialect {
    /// Returns the SQL-building strategy for this dialect.
    pub fn sql_dialect(self) -> &'static dyn SqlDialect {
        match self {
            Dialect::MySql => &MySqlDialect,
            Dialect::Postgres => &PostgresDialect,
        }
    }

    /// Default server port for this dialect.
    pub fn default_port(self) -> u16 {
        match self {
            Dialect::MySql => 3306,
            Dialect::Postgres => 5432,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgres",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = SqlHelperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            _ => Err(SqlHelperError::UnsupportedDialect(s.to_string())),
        }
    }
}

/// Trait for dialect-specific SQL generation.
pub trait SqlDialect: Send + Sync {
    /// The configuration tag this strategy implements.
    fn kind(&self) -> Dialect;

    /// Wraps a trusted identifier in the dialect's quotes.
    /// Embedded quote characters are not escaped.
    fn quote_identifier(&self, ident: &str) -> String;

    /// Parameter marker for the given 1-based position.
    fn placeholder(&self, index: usize) -> String;

    /// Builds the connection string understood by the dialect's driver.
    fn connection_string(&self, profile: &ConnectionProfile) -> Result<String>;

    /// `count` markers continuing a running index that starts at `start`.
    fn placeholders_from(&self, start: usize, count: usize) -> Vec<String> {
        (start..start + count).map(|i| self.placeholder(i)).collect()
    }

    /// `count` markers numbered from 1.
    fn placeholders(&self, count: usize) -> Vec<String> {
        self.placeholders_from(1, count)
    }

    /// Comma-joined row groups for a multi-row VALUES list.
    ///
    /// Numbering runs row-major over all `row_count * column_count` markers,
    /// so row 1 continues where row 0 stopped.
    fn rows_placeholders(&self, row_count: usize, column_count: usize) -> String {
        let mut groups = Vec::with_capacity(row_count);
        let mut index = 1;
        for _ in 0..row_count {
            let group = self.placeholders_from(index, column_count).join(",");
            groups.push(format!("({})", group));
            index += column_count;
        }
        groups.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dialect_tags() {
        assert_eq!("mysql".parse::<Dialect>().unwrap(), Dialect::MySql);
        assert_eq!("Postgres".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("postgresql".parse::<Dialect>().unwrap(), Dialect::Postgres);
    }

    #[test]
    fn test_unsupported_dialect_tag() {
        let err = "sqlite".parse::<Dialect>().unwrap_err();
        match err {
            SqlHelperError::UnsupportedDialect(tag) => assert_eq!(tag, "sqlite"),
            _ => panic!("Expected UnsupportedDialect error"),
        }
    }

    #[test]
    fn test_strategy_matches_tag() {
        assert_eq!(Dialect::MySql.sql_dialect().kind(), Dialect::MySql);
        assert_eq!(Dialect::Postgres.sql_dialect().kind(), Dialect::Postgres);
    }

    #[test]
    fn test_placeholders_count() {
        for dialect in [Dialect::MySql, Dialect::Postgres] {
            let sql_dialect = dialect.sql_dialect();
            assert_eq!(sql_dialect.placeholders(0).len(), 0);
            assert_eq!(sql_dialect.placeholders(7).len(), 7);
        }
    }

    #[test]
    fn test_rows_placeholders_zero_rows() {
        for dialect in [Dialect::MySql, Dialect::Postgres] {
            assert_eq!(dialect.sql_dialect().rows_placeholders(0, 3), "");
        }
    }

    #[test]
    fn test_serde_tags() {
        let dialect: Dialect = serde_json::from_str("\"mysql\"").unwrap();
        assert_eq!(dialect, Dialect::MySql);
        let dialect: Dialect = serde_json::from_str("\"postgres\"").unwrap();
        assert_eq!(dialect, Dialect::Postgres);
        assert!(serde_json::from_str::<Dialect>("\"oracle\"").is_err());
    }
}
