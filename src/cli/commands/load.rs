//! Load command implementation.
//!
//! Reads a JSON frame file and writes its rows into a table.

use crate::cli::output;
use crate::core::tabular::{self, IfExists};
use crate::core::{Database, Executor};
use crate::models::frame::Frame;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Write a frame file into `table`.
pub fn load(database: &Path, table: &str, frame_file: &Path, if_exists: &str) -> Result<()> {
    let policy: IfExists = if_exists.parse()?;

    println!("[INFO] Loading frame: {}", frame_file.display());
    let frame = Frame::load(frame_file)
        .with_context(|| format!("Failed to read frame file: {}", frame_file.display()))?;
    output::print_frame(&frame, "table")?;

    let mut db = Database::open(database)
        .with_context(|| format!("Failed to open database: {}", database.display()))?;
    let written = tabular::write_frame(&mut db, &frame, table, policy)?;

    println!();
    println!("{} Rows affected: {}", "[OK]".green(), written);
    println!("  {} {}", format!("{} rows now:", table).bold(), db.row_count(table)?);

    db.close()?;
    Ok(())
}
