use std::fmt;

use crate::error::{Result, SqlHelperError};

/// A decoded result cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i32),
    BigInt(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer view of the value. Floats are rounded.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(i64::from(*i)),
            Value::BigInt(i) => Some(*i),
            Value::Float(f) => Some(f.round() as i64),
            Value::Null | Value::Text(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(f64::from(*i)),
            Value::BigInt(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Null | Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Int(i) => write!(f, "{}", i),
            Value::BigInt(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Scan target chosen from a column's reported database type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    Text,
    Int,
    BigInt,
    Float,
}

impl ScanKind {
    /// Looks up the scan target for a database type name (case-insensitive).
    ///
    /// | type name             | value            |
    /// |-----------------------|------------------|
    /// | `VARCHAR`             | [`Value::Text`]   |
    /// | `INT2`                | [`Value::Int`]    |
    /// | `INT8`, `BIGINT`      | [`Value::BigInt`] |
    /// | `NUMERIC`, `DECIMAL`  | [`Value::Float`]  |
    pub fn for_type_name(column: &str, type_name: &str) -> Result<Self> {
        match type_name.to_ascii_uppercase().as_str() {
            "VARCHAR" => Ok(ScanKind::Text),
            "INT2" => Ok(ScanKind::Int),
            "INT8" | "BIGINT" => Ok(ScanKind::BigInt),
            "NUMERIC" | "DECIMAL" => Ok(ScanKind::Float),
            _ => Err(SqlHelperError::UnsupportedColumnType {
                column: column.to_string(),
                type_name: type_name.to_string(),
            }),
        }
    }

    /// Decodes a driver-rendered cell. `None` is SQL NULL.
    pub fn decode(self, column: &str, raw: Option<&str>) -> Result<Value> {
        let Some(raw) = raw else {
            return Ok(Value::Null);
        };
        let decode_err = |message: String| SqlHelperError::Decode {
            column: column.to_string(),
            message,
        };
        match self {
            ScanKind::Text => Ok(Value::Text(raw.to_string())),
            ScanKind::Int => raw
                .trim()
                .parse()
                .map(Value::Int)
                .map_err(|e| decode_err(format!("'{}' is not an integer: {}", raw, e))),
            ScanKind::BigInt => raw
                .trim()
                .parse()
                .map(Value::BigInt)
                .map_err(|e| decode_err(format!("'{}' is not a 64-bit integer: {}", raw, e))),
            ScanKind::Float => raw
                .trim()
                .parse()
                .map(Value::Float)
                .map_err(|e| decode_err(format!("'{}' is not a number: {}", raw, e))),
        }
    }
}
