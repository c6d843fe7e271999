//! SQL text builders.
//!
//! Every builder is a pure function of a [`SqlDialect`](crate::dialect::SqlDialect)
//! and its arguments, returning SQL text and, where needed, the positional
//! parameters aligned with its placeholders.

mod reports;
mod statements;

pub use reports::{
    avg_row_count_per_day_sql, row_count_on_date_sql, GroupedSumsQuery, QUANTITY_COLUMN,
};
pub use statements::{
    create_table_sql, drop_table_sql, insert_batches, InsertBatch, MAX_INSERT_ROWS,
};
