use crate::dialect::SqlDialect;
use crate::error::{Result, SqlHelperError};
use crate::types::SqlValue;

/// Maximum number of rows sent in one multi-row INSERT.
pub const MAX_INSERT_ROWS: usize = 1000;

/// One multi-row INSERT statement and its row-major parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertBatch {
    pub sql: String,
    pub params: Vec<SqlValue>,
    pub row_count: usize,
}

/// `CREATE TABLE IF NOT EXISTS <table> (<columns>)`.
/// Column definitions are passed through verbatim.
pub fn create_table_sql<S: AsRef<str>>(
    dialect: &dyn SqlDialect,
    table: &str,
    columns: &[S],
) -> String {
    let definitions: Vec<&str> = columns.iter().map(AsRef::as_ref).collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        dialect.quote_identifier(table),
        definitions.join(", ")
    )
}

/// `DROP TABLE IF EXISTS <table>`.
pub fn drop_table_sql(dialect: &dyn SqlDialect, table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", dialect.quote_identifier(table))
}

/// Splits `rows` into INSERT statements of at most `batch_size` rows each,
/// preserving row order.
///
/// Every row must hold exactly one value per column. Zero rows yield zero
/// batches.
pub fn insert_batches<S: AsRef<str>>(
    dialect: &dyn SqlDialect,
    table: &str,
    rows: &[Vec<SqlValue>],
    columns: &[S],
    batch_size: usize,
) -> Result<Vec<InsertBatch>> {
    if batch_size == 0 {
        return Err(SqlHelperError::InvalidArgument(
            "batch size must be at least 1".to_string(),
        ));
    }
    if let Some((row, values)) = rows
        .iter()
        .enumerate()
        .find(|(_, values)| values.len() != columns.len())
    {
        return Err(SqlHelperError::RowWidthMismatch {
            row,
            expected: columns.len(),
            actual: values.len(),
        });
    }

    let quoted: Vec<String> = columns
        .iter()
        .map(|c| dialect.quote_identifier(c.as_ref()))
        .collect();
    let prefix = format!(
        "INSERT INTO {} ({}) VALUES ",
        dialect.quote_identifier(table),
        quoted.join(", ")
    );

    let batches = rows
        .chunks(batch_size)
        .map(|chunk| InsertBatch {
            sql: format!(
                "{}{}",
                prefix,
                dialect.rows_placeholders(chunk.len(), columns.len())
            ),
            params: chunk.iter().flatten().cloned().collect(),
            row_count: chunk.len(),
        })
        .collect();
    Ok(batches)
}
