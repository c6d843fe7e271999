use async_trait::async_trait;

use crate::error::Result;
use crate::types::{RawQueryResult, SqlValue};

/// Trait for database driver implementations.
/// A driver only knows how to open connections from a connection string;
/// everything else happens on the returned [`Connection`].
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Open a new connection. Each call yields an independent connection.
    async fn connect(&self, connection_string: &str) -> Result<Box<dyn Connection>>;
}

/// An open database connection.
/// Drivers are responsible for:
/// - Converting SqlValue parameters to native types
/// - Reporting each result column's database type name
/// - Rendering result cells as text
#[async_trait]
pub trait Connection: Send {
    /// Execute a statement, returning the number of affected rows.
    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64>;

    /// Run a query and fully materialize its result.
    async fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult>;

    /// Close the connection.
    async fn close(self: Box<Self>) -> Result<()>;
}
