use std::collections::HashMap;

use crate::error::{Result, SqlHelperError};
use crate::types::{ScanKind, Value};

/// Name and reported database type of a result column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub type_name: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Driver-agnostic raw result from a database query.
/// Cells are rendered as text by the driver; `None` is SQL NULL.
#[derive(Debug, Clone)]
pub struct RawQueryResult {
    /// Columns in order, with their reported database type names
    pub columns: Vec<ColumnInfo>,
    /// Rows, where each row holds one cell per column in column order
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawQueryResult {
    pub fn new(columns: Vec<ColumnInfo>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// A single decoded row, keyed by column name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    /// Gets a value by column name.
    pub fn get(&self, column: &str) -> Result<&Value> {
        self.values
            .get(column)
            .ok_or_else(|| SqlHelperError::ColumnNotFound(column.to_string()))
    }

    /// Gets an integer value (small, large or rounded decimal) by column name.
    pub fn get_i64(&self, column: &str) -> Result<Option<i64>> {
        let value = self.get(column)?;
        if value.is_null() {
            return Ok(None);
        }
        value
            .as_i64()
            .map(Some)
            .ok_or_else(|| Self::wrong_kind(column, "an integer", value))
    }

    pub fn get_f64(&self, column: &str) -> Result<Option<f64>> {
        let value = self.get(column)?;
        if value.is_null() {
            return Ok(None);
        }
        value
            .as_f64()
            .map(Some)
            .ok_or_else(|| Self::wrong_kind(column, "a number", value))
    }

    pub fn get_str(&self, column: &str) -> Result<Option<&str>> {
        let value = self.get(column)?;
        if value.is_null() {
            return Ok(None);
        }
        value
            .as_str()
            .map(Some)
            .ok_or_else(|| Self::wrong_kind(column, "text", value))
    }

    fn wrong_kind(column: &str, expected: &str, value: &Value) -> SqlHelperError {
        SqlHelperError::Decode {
            column: column.to_string(),
            message: format!("expected {}, got {:?}", expected, value),
        }
    }

    /// Returns all column names in this row.
    pub fn columns(&self) -> Vec<&str> {
        self.values.keys().map(|s| s.as_str()).collect()
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_map(self) -> HashMap<String, Value> {
        self.values
    }
}

impl From<HashMap<String, Value>> for Row {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

/// Result of a query, decoded into generic rows.
#[derive(Debug)]
pub struct QueryResult {
    rows: Vec<Row>,
}

impl QueryResult {
    /// Decodes a RawQueryResult.
    ///
    /// Each column's scan target comes from its reported type name; one
    /// unsupported type fails the whole result.
    pub fn from_raw(raw: RawQueryResult) -> Result<Self> {
        // Column types only matter once there is a row to decode
        if raw.rows.is_empty() {
            return Ok(Self { rows: Vec::new() });
        }

        let kinds = raw
            .columns
            .iter()
            .map(|c| ScanKind::for_type_name(&c.name, &c.type_name))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::with_capacity(raw.rows.len());
        for cells in raw.rows {
            if cells.len() != raw.columns.len() {
                return Err(SqlHelperError::Decode {
                    column: String::new(),
                    message: format!(
                        "row has {} cell(s) for {} column(s)",
                        cells.len(),
                        raw.columns.len()
                    ),
                });
            }
            let mut values = HashMap::with_capacity(cells.len());
            for ((column, kind), cell) in raw.columns.iter().zip(&kinds).zip(cells) {
                let value = kind.decode(&column.name, cell.as_deref())?;
                values.insert(column.name.clone(), value);
            }
            rows.push(Row { values });
        }
        Ok(Self { rows })
    }

    /// Extracts a single row from the result.
    /// Returns an error if the result contains zero or more than one row.
    pub fn single_row(self) -> Result<Row> {
        if self.rows.len() != 1 {
            return Err(SqlHelperError::UnexpectedRowCount {
                expected: 1,
                actual: self.rows.len(),
            });
        }
        Ok(self.rows.into_iter().next().unwrap_or_default())
    }

    /// Returns all rows from the result.
    pub fn rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns a reference to the rows without consuming the result.
    pub fn rows_ref(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of rows in this result.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if this result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
