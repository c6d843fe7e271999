use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::task::JoinHandle;
use tokio_postgres::{
    types::{ToSql, Type},
    Client, NoTls,
};

use crate::error::{Result, SqlHelperError};
use crate::traits::{Connection, DatabaseDriver};
use crate::types::{ColumnInfo, RawQueryResult, SqlValue};

/// PostgreSQL driver implementation using tokio-postgres.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPostgresDriver;

#[async_trait]
impl DatabaseDriver for TokioPostgresDriver {
    async fn connect(&self, connection_string: &str) -> Result<Box<dyn Connection>> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
            .await
            .map_err(|e| SqlHelperError::ConnectionFailed(e.to_string()))?;

        // Spawn the connection handler; it finishes once the client is dropped
        let handle = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "PostgreSQL connection error");
            }
        });

        Ok(Box::new(TokioPostgresConnection { client, handle }))
    }
}

/// A single tokio-postgres client plus its connection task.
pub struct TokioPostgresConnection {
    client: Client,
    handle: JoinHandle<()>,
}

#[async_trait]
impl Connection for TokioPostgresConnection {
    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        let converted_params: Vec<Box<dyn ToSql + Sync + Send>> =
            params.iter().map(sql_value_to_tosql).collect();
        let param_refs: Vec<&(dyn ToSql + Sync)> = converted_params
            .iter()
            .map(|b| b.as_ref() as &(dyn ToSql + Sync))
            .collect();

        self.client
            .execute(sql, &param_refs)
            .await
            .map_err(|e| SqlHelperError::QueryFailed(e.to_string()))
    }

    async fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        let converted_params: Vec<Box<dyn ToSql + Sync + Send>> =
            params.iter().map(sql_value_to_tosql).collect();
        let param_refs: Vec<&(dyn ToSql + Sync)> = converted_params
            .iter()
            .map(|b| b.as_ref() as &(dyn ToSql + Sync))
            .collect();

        // Prepare first so column metadata is known even for empty results
        let statement = self
            .client
            .prepare(sql)
            .await
            .map_err(|e| SqlHelperError::QueryFailed(e.to_string()))?;
        let rows = self
            .client
            .query(&statement, &param_refs)
            .await
            .map_err(|e| SqlHelperError::QueryFailed(e.to_string()))?;

        let columns: Vec<ColumnInfo> = statement
            .columns()
            .iter()
            .map(|c| ColumnInfo::new(c.name(), c.type_().name().to_ascii_uppercase()))
            .collect();

        let mut result_rows = Vec::with_capacity(rows.len());
        for row in &rows {
            let cells = row
                .columns()
                .iter()
                .enumerate()
                .map(|(i, col)| row_value_to_string(row, i, col.name(), col.type_()))
                .collect::<Result<Vec<_>>>()?;
            result_rows.push(cells);
        }

        Ok(RawQueryResult::new(columns, result_rows))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let TokioPostgresConnection { client, handle } = *self;
        drop(client);
        handle
            .await
            .map_err(|e| SqlHelperError::ConnectionFailed(e.to_string()))
    }
}

/// Convert a SqlValue to a boxed ToSql trait object.
fn sql_value_to_tosql(value: &SqlValue) -> Box<dyn ToSql + Sync + Send> {
    match value {
        SqlValue::Null => Box::new(None::<String>),
        SqlValue::Text(s) => Box::new(s.clone()),
        SqlValue::Int32(i) => Box::new(*i),
        SqlValue::Int64(i) => Box::new(*i),
        SqlValue::Float64(f) => Box::new(*f),
        SqlValue::Bool(b) => Box::new(*b),
        SqlValue::Date(d) => Box::new(*d),
    }
}

/// Render the value at `index` as text, picking the native type from the
/// column's reported type.
fn row_value_to_string(
    row: &tokio_postgres::Row,
    index: usize,
    column: &str,
    type_: &Type,
) -> Result<Option<String>> {
    let failed = |e: tokio_postgres::Error| SqlHelperError::Decode {
        column: column.to_string(),
        message: e.to_string(),
    };

    let value = match *type_ {
        Type::VARCHAR | Type::TEXT | Type::BPCHAR | Type::NAME => {
            row.try_get::<_, Option<String>>(index).map_err(failed)?
        }
        Type::INT2 => row
            .try_get::<_, Option<i16>>(index)
            .map_err(failed)?
            .map(|v| v.to_string()),
        Type::INT4 => row
            .try_get::<_, Option<i32>>(index)
            .map_err(failed)?
            .map(|v| v.to_string()),
        Type::INT8 => row
            .try_get::<_, Option<i64>>(index)
            .map_err(failed)?
            .map(|v| v.to_string()),
        Type::NUMERIC => row
            .try_get::<_, Option<Decimal>>(index)
            .map_err(failed)?
            .map(|v| v.to_string()),
        Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(index)
            .map_err(failed)?
            .map(|v| v.to_string()),
        Type::FLOAT8 => row
            .try_get::<_, Option<f64>>(index)
            .map_err(failed)?
            .map(|v| v.to_string()),
        Type::BOOL => row
            .try_get::<_, Option<bool>>(index)
            .map_err(failed)?
            .map(|v| v.to_string()),
        Type::DATE => row
            .try_get::<_, Option<chrono::NaiveDate>>(index)
            .map_err(failed)?
            .map(|v| v.to_string()),
        _ => {
            return Err(SqlHelperError::UnsupportedColumnType {
                column: column.to_string(),
                type_name: type_.name().to_ascii_uppercase(),
            })
        }
    };
    Ok(value)
}
