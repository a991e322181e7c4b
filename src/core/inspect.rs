//! Best-effort inspection of an existing database.
//!
//! The inspected database may come from elsewhere and its schema is not
//! known in advance, so everything here works from `sqlite_master`.

use super::database::Executor;
use super::tabular::{read_frame, table_columns};
use crate::models::frame::Frame;
use crate::utils::sql::quote_ident;
use crate::Result;

/// Rows of `sqlite_master`: every table, view, index and trigger.
pub fn schema_frame(db: &impl Executor) -> Result<Frame> {
    read_frame(
        db,
        "SELECT type, name, tbl_name, sql FROM sqlite_master ORDER BY type, name;",
        &[],
    )
}

/// Names of the user tables.
pub fn table_names(db: &impl Executor) -> Result<Vec<String>> {
    let mut stmt = db.connection().prepare(
        "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name;",
    )?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}

/// Row count of every user table.
pub fn table_row_counts(db: &impl Executor) -> Result<Vec<(String, i64)>> {
    table_names(db)?
        .into_iter()
        .map(|name| -> Result<(String, i64)> {
            let count = db.row_count(&name)?;
            Ok((name, count))
        })
        .collect()
}

/// A grouped aggregate over one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub table: String,
    pub group_by: String,
    /// Column summed per group. Only rows are counted when absent.
    pub sum: Option<String>,
}

impl Aggregate {
    fn to_sql(&self) -> Result<String> {
        let table = quote_ident(&self.table)?;
        let group = quote_ident(&self.group_by)?;
        let total = match &self.sum {
            Some(column) => format!(", sum({}) AS total", quote_ident(column)?),
            None => String::new(),
        };
        Ok(format!(
            "SELECT {group}, count(*) AS row_count{total} FROM {table} GROUP BY {group} ORDER BY {group};"
        ))
    }
}

/// Fallback aggregate when none is configured: the first non-empty user
/// table, grouped by its first column. `None` when every table is empty.
pub fn default_aggregate(db: &impl Executor) -> Result<Option<Aggregate>> {
    for (table, count) in table_row_counts(db)? {
        if count == 0 {
            continue;
        }
        if let Some((column, _)) = table_columns(db, &table)?.into_iter().next() {
            return Ok(Some(Aggregate {
                table,
                group_by: column,
                sum: None,
            }));
        }
    }
    Ok(None)
}

/// Group a table and count (and optionally sum) within each group.
pub fn aggregate(db: &impl Executor, spec: &Aggregate) -> Result<Frame> {
    read_frame(db, &spec.to_sql()?, &[])
}
