//! Console output helpers shared by the commands.

use crate::models::frame::{Datum, Frame};
use colored::Colorize;
use std::fmt::Debug;

/// Print a step heading.
pub fn heading(title: &str) {
    println!();
    println!("{}", format!("== {} ==", title).bold().cyan());
}

/// Render a row as a parenthesized tuple, quoting text values.
pub fn format_tuple(row: &[Datum]) -> String {
    let values: Vec<String> = row
        .iter()
        .map(|v| match v {
            Datum::Text(s) => format!("'{}'", s),
            other => other.to_string(),
        })
        .collect();
    format!("({})", values.join(", "))
}

/// Print raw result rows, one per line.
pub fn show_rows(rows: &[Vec<Datum>]) {
    println!("Rows:");
    for (i, row) in rows.iter().enumerate() {
        println!("Row {} {}", i, format_tuple(row));
    }
}

/// Print typed records, one per line.
pub fn show_records<T: Debug>(records: &[T]) {
    println!("Rows:");
    for (i, record) in records.iter().enumerate() {
        println!("Row {} {:?}", i, record);
    }
}

/// Print a frame as a table or as JSON.
pub fn print_frame(frame: &Frame, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(frame)?),
        _ => {
            println!("{}", frame);
            println!("[{} rows x {} columns]", frame.len(), frame.width());
        }
    }
    Ok(())
}
