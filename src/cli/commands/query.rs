//! Query command implementation.

use crate::cli::output;
use crate::core::{tabular, Database};
use anyhow::{Context, Result};
use std::path::Path;

/// Run a query and print its result frame.
pub fn run_query(database: &Path, sql: &str, format: &str) -> Result<()> {
    let db = Database::open_read_only(database)?;
    let frame = tabular::read_frame(&db, sql, &[]).context("Query failed")?;
    output::print_frame(&frame, format)?;
    db.close()?;
    Ok(())
}
