use chrono::NaiveDate;

use crate::dialect::SqlDialect;
use crate::error::{Result, SqlHelperError};
use crate::types::SqlValue;

/// Alias of the per-group row count in grouped reports.
pub const QUANTITY_COLUMN: &str = "_quantity";

fn check_day_count(day_count: u32) -> Result<()> {
    if day_count == 0 {
        return Err(SqlHelperError::InvalidArgument(
            "day count must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Average number of rows per day between `start` and `end` (inclusive),
/// dividing the total by `day_count`. The result column is `c`.
pub fn avg_row_count_per_day_sql(
    dialect: &dyn SqlDialect,
    table: &str,
    date_column: &str,
    start: NaiveDate,
    end: NaiveDate,
    day_count: u32,
) -> Result<(String, Vec<SqlValue>)> {
    check_day_count(day_count)?;
    let table = dialect.quote_identifier(table);
    let date_column = dialect.quote_identifier(date_column);
    let p = dialect.placeholders(2);

    let sql = format!(
        "SELECT ROUND(SUM(row_count_per_day) / {n}) AS c FROM (\
         SELECT {d}, COUNT(*) AS row_count_per_day FROM {t} \
         WHERE {d} BETWEEN {p0} AND {p1} GROUP BY {d}\
         ) q",
        n = day_count,
        d = date_column,
        t = table,
        p0 = p[0],
        p1 = p[1],
    );
    Ok((sql, vec![SqlValue::Date(start), SqlValue::Date(end)]))
}

/// Number of rows on a single date. The result column is `c`.
pub fn row_count_on_date_sql(
    dialect: &dyn SqlDialect,
    table: &str,
    date_column: &str,
    date: NaiveDate,
) -> (String, Vec<SqlValue>) {
    let sql = format!(
        "SELECT COUNT(*) AS c FROM {} WHERE {} = {}",
        dialect.quote_identifier(table),
        dialect.quote_identifier(date_column),
        dialect.placeholder(1)
    );
    (sql, vec![SqlValue::Date(date)])
}

/// Per-group numeric sums over a date column.
///
/// Groups are rows sharing a value of `group_column`. When `filtered_groups`
/// is not empty only those group values are reported. Every result row has
/// the group column, [`QUANTITY_COLUMN`] and one entry per numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSumsQuery {
    pub table: String,
    pub date_column: String,
    pub group_column: String,
    pub numeric_columns: Vec<String>,
    pub filtered_groups: Vec<SqlValue>,
}

impl GroupedSumsQuery {
    pub fn new(
        table: impl Into<String>,
        date_column: impl Into<String>,
        group_column: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            date_column: date_column.into(),
            group_column: group_column.into(),
            numeric_columns: Vec::new(),
            filtered_groups: Vec::new(),
        }
    }

    /// Columns to sum per group.
    pub fn numeric_columns<S: Into<String>>(
        mut self,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.numeric_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the report to these group values.
    pub fn filter_groups<V: Into<SqlValue>>(
        mut self,
        groups: impl IntoIterator<Item = V>,
    ) -> Self {
        self.filtered_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Per-group daily averages between `start` and `end` (inclusive).
    ///
    /// The inner query sums per date and group; the outer query divides the
    /// per-group totals by `day_count`.
    pub fn build_avg_per_day(
        &self,
        dialect: &dyn SqlDialect,
        start: NaiveDate,
        end: NaiveDate,
        day_count: u32,
    ) -> Result<(String, Vec<SqlValue>)> {
        check_day_count(day_count)?;
        let table = dialect.quote_identifier(&self.table);
        let date_column = dialect.quote_identifier(&self.date_column);
        let group_column = dialect.quote_identifier(&self.group_column);
        let p = dialect.placeholders(2 + self.filtered_groups.len());

        let mut sums = String::new();
        let mut averages = String::new();
        for column in &self.numeric_columns {
            let column = dialect.quote_identifier(column);
            sums.push_str(&format!(", SUM({c}) AS {c}", c = column));
            averages.push_str(&format!(
                ", (SUM({c}) / {n}) AS {c}",
                c = column,
                n = day_count
            ));
        }

        let mut sql = format!(
            "SELECT {g}, ROUND(SUM({q}) / {n}) AS {q}{averages} FROM (\
             SELECT {d}, {g}, COUNT(*) AS {q}{sums} FROM {t} \
             WHERE {d} BETWEEN {p0} AND {p1}",
            g = group_column,
            q = QUANTITY_COLUMN,
            n = day_count,
            averages = averages,
            d = date_column,
            sums = sums,
            t = table,
            p0 = p[0],
            p1 = p[1],
        );
        self.push_group_filter(&mut sql, &group_column, &p[2..]);
        sql.push_str(&format!(
            " GROUP BY {d}, {g}) q GROUP BY {g}",
            d = date_column,
            g = group_column
        ));

        let mut params = vec![SqlValue::Date(start), SqlValue::Date(end)];
        params.extend(self.filtered_groups.iter().cloned());
        Ok((sql, params))
    }

    /// Raw per-group sums and row counts on a single date.
    pub fn build_on_date(
        &self,
        dialect: &dyn SqlDialect,
        date: NaiveDate,
    ) -> (String, Vec<SqlValue>) {
        let table = dialect.quote_identifier(&self.table);
        let date_column = dialect.quote_identifier(&self.date_column);
        let group_column = dialect.quote_identifier(&self.group_column);
        let p = dialect.placeholders(1 + self.filtered_groups.len());

        let mut sums = String::new();
        for column in &self.numeric_columns {
            sums.push_str(&format!(
                ", SUM({c}) AS {c}",
                c = dialect.quote_identifier(column)
            ));
        }

        let mut sql = format!(
            "SELECT {g}, COUNT(*) AS {q}{sums} FROM {t} WHERE {d} = {p0}",
            g = group_column,
            q = QUANTITY_COLUMN,
            sums = sums,
            t = table,
            d = date_column,
            p0 = p[0],
        );
        self.push_group_filter(&mut sql, &group_column, &p[1..]);
        sql.push_str(&format!(" GROUP BY {}", group_column));

        let mut params = vec![SqlValue::Date(date)];
        params.extend(self.filtered_groups.iter().cloned());
        (sql, params)
    }

    fn push_group_filter(&self, sql: &mut String, group_column: &str, placeholders: &[String]) {
        if self.filtered_groups.is_empty() {
            return;
        }
        sql.push_str(&format!(
            " AND {} IN ({})",
            group_column,
            placeholders.join(", ")
        ));
    }
}
