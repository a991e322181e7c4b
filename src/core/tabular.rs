//! Moving rows between tables and frames.

use super::batch::Batch;
use super::database::{Database, Executor};
use crate::models::frame::{Datum, DatumKind, Frame};
use crate::utils::sql::{quote_ident, Affinity};
use crate::{Error, Result};
use std::collections::HashSet;
use std::str::FromStr;

/// What [`write_frame`] does when the target table already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IfExists {
    /// Add the frame's rows to the table.
    #[default]
    Append,
    /// Drop the table and recreate it from the frame.
    Replace,
    /// Refuse to write.
    Fail,
}

impl FromStr for IfExists {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "append" => Ok(IfExists::Append),
            "replace" => Ok(IfExists::Replace),
            "fail" => Ok(IfExists::Fail),
            other => Err(Error::other(format!(
                "Unknown if-exists policy: {} (expected append, replace or fail)",
                other
            ))),
        }
    }
}

/// Read the result of any query into a frame.
pub fn read_frame(db: &impl Executor, sql: &str, params: &[Datum]) -> Result<Frame> {
    db.execute(sql, params)?.into_frame()
}

/// Write a frame's rows into `table` as one batch. Returns the number of rows written.
///
/// A missing table is created from the frame's column kinds under every policy.
pub fn write_frame(db: &mut Database, frame: &Frame, table: &str, if_exists: IfExists) -> Result<usize> {
    let quoted = quote_ident(table)?;
    check_column_names(frame, table)?;

    let written = db.atomically(|batch| {
        match (batch.table_exists(table)?, if_exists) {
            (true, IfExists::Fail) => return Err(Error::TableExists(table.to_string())),
            (true, IfExists::Replace) => {
                batch.execute(&format!("DROP TABLE {}", quoted), &[])?;
                create_table_for(batch, frame, &quoted)?;
            }
            (true, IfExists::Append) => check_alignment(batch, frame, table)?,
            (false, _) => create_table_for(batch, frame, &quoted)?,
        }

        if frame.is_empty() {
            return Ok(0);
        }
        let sql = insert_sql(frame, &quoted)?;
        batch.execute_many(&sql, frame.rows())
    })?;

    tracing::info!("Wrote {} rows into {}", written, table);
    Ok(written)
}

fn check_column_names(frame: &Frame, table: &str) -> Result<()> {
    if frame.width() == 0 {
        return Err(Error::schema_mismatch(table, "frame has no columns"));
    }
    let mut seen = HashSet::new();
    for column in frame.columns() {
        if !seen.insert(column.to_lowercase()) {
            return Err(Error::schema_mismatch(
                table,
                format!("column {:?} appears more than once", column),
            ));
        }
    }
    Ok(())
}

fn insert_sql(frame: &Frame, quoted_table: &str) -> Result<String> {
    let columns = frame
        .columns()
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Result<Vec<_>>>()?;
    let placeholders = vec!["?"; columns.len()].join(",");
    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({});",
        quoted_table,
        columns.join(","),
        placeholders
    ))
}

fn create_table_for(batch: &Batch<'_>, frame: &Frame, quoted_table: &str) -> Result<()> {
    let mut definitions = Vec::with_capacity(frame.width());
    for (index, column) in frame.columns().iter().enumerate() {
        let declared = frame
            .column_kind(index)
            .map(DatumKind::declared_type)
            .unwrap_or("");
        definitions.push(format!("{} {}", quote_ident(column)?, declared).trim_end().to_string());
    }
    let sql = format!("CREATE TABLE {} ({});", quoted_table, definitions.join(", "));
    batch.execute(&sql, &[])?;
    Ok(())
}

/// Declared columns of a table, as (name, declared type).
pub fn table_columns(db: &impl Executor, table: &str) -> Result<Vec<(String, String)>> {
    let sql = format!("PRAGMA table_info({})", quote_ident(table)?);
    let mut stmt = db.connection().prepare(&sql)?;
    let columns = stmt
        .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

fn accepts(affinity: Affinity, kind: DatumKind) -> bool {
    match (affinity, kind) {
        (_, DatumKind::Null) | (Affinity::Blob, _) => true,
        (Affinity::Integer | Affinity::Real | Affinity::Numeric, DatumKind::Integer | DatumKind::Real) => true,
        (Affinity::Text, DatumKind::Text) => true,
        _ => false,
    }
}

/// Check that every frame column exists in `table` and every value fits its declared type.
fn check_alignment(db: &impl Executor, frame: &Frame, table: &str) -> Result<()> {
    let declared = table_columns(db, table)?;

    for (index, column) in frame.columns().iter().enumerate() {
        let Some((_, decl_type)) = declared
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
        else {
            return Err(Error::schema_mismatch(
                table,
                format!("column {:?} does not exist", column),
            ));
        };

        let affinity = Affinity::from_declared(decl_type);
        for (row_index, row) in frame.rows().iter().enumerate() {
            let kind = row[index].kind();
            if !accepts(affinity, kind) {
                return Err(Error::schema_mismatch(
                    table,
                    format!(
                        "column {:?} is declared {}, row {} holds a {} value",
                        column, decl_type, row_index, kind
                    ),
                ));
            }
        }
    }
    Ok(())
}
