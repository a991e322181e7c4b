//! Inspect command implementation.
//!
//! Best-effort look at a database whose schema is not known in advance.

use crate::cli::output;
use crate::core::inspect::{self, Aggregate};
use crate::core::Database;
use crate::preflight;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Inspect `path`. A missing file is reported and is not an error.
///
/// Without an explicit aggregate, the first non-empty table is grouped by its first column.
pub fn inspect(path: &Path, aggregate: Option<Aggregate>) -> Result<()> {
    let check = preflight::check_inspect_database(path);
    preflight::print_results(std::slice::from_ref(&check));
    if !check.success {
        println!("{}", "Nothing to inspect, skipping.".yellow());
        return Ok(());
    }

    let db = Database::open_read_only(path)
        .with_context(|| format!("Failed to open database: {}", path.display()))?;

    output::heading("Schema");
    output::print_frame(&inspect::schema_frame(&db)?, "table")?;

    output::heading("Table sizes");
    for (table, count) in inspect::table_row_counts(&db)? {
        println!("  {} {}", format!("{}:", table).bold(), count);
    }

    let aggregate = match aggregate {
        Some(spec) => Some(spec),
        None => inspect::default_aggregate(&db).unwrap_or_else(|e| {
            println!("{} {}", "[WARN]".yellow(), e);
            None
        }),
    };
    if let Some(spec) = aggregate {
        output::heading(&format!("{} by {}", spec.table, spec.group_by));
        match inspect::aggregate(&db, &spec) {
            Ok(frame) => output::print_frame(&frame, "table")?,
            Err(e) => println!("{} {}", "[WARN]".yellow(), e),
        }
    }

    db.close()?;
    Ok(())
}
