mod row;
mod sql_value;
mod value;

pub use row::{ColumnInfo, QueryResult, RawQueryResult, Row};
pub use sql_value::SqlValue;
pub use value::{ScanKind, Value};
