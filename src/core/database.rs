//! Database handle and statement interface.
//!
//! A [`Database`] owns the one SQLite connection of a run. Statements go
//! through the [`Executor`] trait, which both the handle and an open
//! [`Batch`] implement, so the same schema and catalog code runs inside or
//! outside a transaction.

use super::batch::Batch;
use crate::models::frame::{Datum, Frame};
use crate::utils::{fs, sql};
use crate::{Error, Result};
use rusqlite::{params_from_iter, Connection, OpenFlags};
use std::fmt;
use std::path::{Path, PathBuf};

/// Name and declared type of a result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescription {
    pub name: String,
    pub decl_type: Option<String>,
}

impl fmt::Display for ColumnDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            self.name,
            self.decl_type.as_deref().unwrap_or("None")
        )
    }
}

/// Outcome of one executed statement.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    description: Vec<ColumnDescription>,
    rows: Vec<Vec<Datum>>,
    rowcount: Option<usize>,
}

impl Cursor {
    /// Result columns. Empty for statements that return no rows.
    pub fn description(&self) -> &[ColumnDescription] {
        &self.description
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.description.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn rows(&self) -> &[Vec<Datum>] {
        &self.rows
    }

    pub fn fetch_all(self) -> Vec<Vec<Datum>> {
        self.rows
    }

    /// Rows changed by an INSERT, UPDATE or DELETE. `None` for queries.
    pub fn rowcount(&self) -> Option<usize> {
        self.rowcount
    }

    pub fn into_frame(self) -> Result<Frame> {
        Frame::from_rows(self.description.into_iter().map(|c| c.name), self.rows)
    }
}

/// Anything statements can be executed against.
pub trait Executor {
    fn connection(&self) -> &Connection;

    /// Execute a single statement with positional parameters.
    fn execute(&self, sql: &str, params: &[Datum]) -> Result<Cursor> {
        run_statement(self.connection(), sql, params)
    }

    /// Execute one statement once per parameter row. Returns the summed row count.
    fn execute_many<I>(&self, sql: &str, rows: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: AsRef<[Datum]>,
    {
        run_many(self.connection(), sql, rows)
    }

    /// Execute several `;`-separated statements.
    fn execute_script(&self, sql: &str) -> Result<()> {
        tracing::debug!("script: {}", sql::compact(sql));
        self.connection().execute_batch(sql)?;
        Ok(())
    }

    /// Whether a base table with this name exists. Names match case-insensitively, as in SQL.
    fn table_exists(&self, table: &str) -> Result<bool> {
        let mut stmt = self.connection().prepare(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
        )?;
        Ok(stmt.exists([table])?)
    }

    /// Number of rows in a table or view.
    fn row_count(&self, table: &str) -> Result<i64> {
        let sql = format!("SELECT count(*) FROM {}", sql::quote_ident(table)?);
        let count = self.connection().query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }
}

fn run_statement(conn: &Connection, sql: &str, params: &[Datum]) -> Result<Cursor> {
    tracing::debug!("execute: {}", sql::compact(sql));
    let mut stmt = conn.prepare(sql)?;
    let description: Vec<ColumnDescription> = stmt
        .columns()
        .iter()
        .map(|c| ColumnDescription {
            name: c.name().to_string(),
            decl_type: c.decl_type().map(str::to_string),
        })
        .collect();

    if description.is_empty() {
        let affected = stmt.execute(params_from_iter(params.iter()))?;
        return Ok(Cursor {
            description,
            rows: Vec::new(),
            rowcount: Some(affected),
        });
    }

    let width = description.len();
    let mut rows = Vec::new();
    let mut result = stmt.query(params_from_iter(params.iter()))?;
    while let Some(row) = result.next()? {
        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            values.push(row.get::<_, Datum>(i)?);
        }
        rows.push(values);
    }

    Ok(Cursor {
        description,
        rows,
        rowcount: None,
    })
}

fn run_many<I>(conn: &Connection, sql: &str, rows: I) -> Result<usize>
where
    I: IntoIterator,
    I::Item: AsRef<[Datum]>,
{
    tracing::debug!("execute many: {}", sql::compact(sql));
    let mut stmt = conn.prepare(sql)?;
    let mut affected = 0;
    for row in rows {
        affected += stmt.execute(params_from_iter(row.as_ref().iter()))?;
    }
    Ok(affected)
}

/// An open SQLite database. The connection closes when the handle is dropped.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Create a new database file, deleting any existing file at `path` first.
    pub fn create_fresh(path: &Path) -> Result<Self> {
        if fs::remove_if_exists(path)? {
            tracing::info!("Removed old database: {}", path.display());
        }
        let db = Self::open(path)?;
        tracing::info!("Created database: {}", path.display());
        Ok(db)
    }

    /// Open a database file, creating it if missing.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an existing database file without write access.
    pub fn open_read_only(path: &Path) -> Result<Self> {
        fs::ensure_file(path)?;
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::info!("Opened read-only database: {}", path.display());
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: None,
        })
    }

    /// File backing this database, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Start a batch. Dropping the batch without committing rolls it back.
    pub fn batch(&mut self) -> Result<Batch<'_>> {
        Batch::new(self.conn.transaction()?)
    }

    /// Run `f` inside a batch: commit when it returns `Ok`, roll back otherwise.
    pub fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Batch<'_>) -> Result<T>,
    {
        let batch = self.batch()?;
        match f(&batch) {
            Ok(value) => {
                batch.commit()?;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!("Batch rolled back: {}", err);
                if let Err(rollback_err) = batch.rollback() {
                    tracing::warn!("Rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Close the connection, reporting any error the engine raises.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, e)| Error::from(e))?;
        if let Some(path) = path {
            tracing::debug!("Closed database: {}", path.display());
        }
        Ok(())
    }
}

impl Executor for Database {
    fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Version of the linked SQLite library.
pub fn sqlite_version() -> &'static str {
    rusqlite::version()
}
