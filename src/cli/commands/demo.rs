//! Demo command implementation.
//!
//! Walks through the catalog step by step on a fresh database:
//! - create tables and insert rows singly and in bulk
//! - show that a batch with a duplicate key is discarded as a whole
//! - update by pattern, group and aggregate, join through a view
//! - move rows between the database and a frame
//!
//! It ends with a look at a second, pre-existing database.

use super::inspect;
use crate::cli::output;
use crate::core::inspect::Aggregate;
use crate::core::{catalog, schema, seed, tabular, Database, Executor};
use crate::core::tabular::IfExists;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Run the walkthrough on `database`, then inspect `inspect_path`.
pub fn run(database: &Path, inspect_path: &Path, aggregate: Option<Aggregate>) -> Result<()> {
    println!("{}", "[DEMO] SQL walkthrough".bold().cyan());
    println!("[INFO] Working database: {}", database.display());

    let mut db = Database::create_fresh(database)
        .with_context(|| format!("Failed to create database: {}", database.display()))?;

    walkthrough(&mut db)?;
    db.close()?;

    output::heading("Existing database");
    inspect::inspect(inspect_path, aggregate)
}

fn walkthrough(db: &mut Database) -> Result<()> {
    output::heading("Create the courses table");
    db.atomically(|batch| schema::create_courses(batch))?;
    println!("{} courses created", "[OK]".green());

    output::heading("Insert rows one at a time");
    db.atomically(|batch| {
        for course in seed::single_courses() {
            batch.execute(catalog::INSERT_COURSE, &course.to_row())?;
        }
        Ok(())
    })?;
    let cursor = db.execute("SELECT * FROM courses ORDER BY prefix, number;", &[])?;
    output::show_rows(cursor.rows());

    output::heading("Insert several rows with one call");
    let affected = catalog::insert_courses(db, &seed::bulk_courses())?;
    println!("Rows affected: {}", affected);
    let cursor = db.execute("SELECT * FROM courses;", &[])?;
    output::show_rows(cursor.rows());

    println!();
    println!("Cursor description:");
    for (i, column) in cursor.description().iter().enumerate() {
        println!("Column {}: {}", i, column);
    }
    println!("Column names: {:?}", cursor.column_names());

    output::heading("Count courses by prefix");
    output::show_records(&catalog::count_by_prefix(&*db)?);

    output::heading("Insert a batch containing a duplicate");
    match catalog::insert_courses(db, &seed::conflicting_courses()) {
        Ok(affected) => println!("Rows affected: {}", affected),
        Err(e) if e.is_integrity() => {
            println!("{} {}", "[EXPECTED]".yellow(), e);
            println!("The whole batch was rolled back, including the new course.");
        }
        Err(e) => return Err(e.into()),
    }
    output::show_records(&catalog::list_courses(&*db)?);

    output::heading("Update rows matching a pattern");
    let affected = catalog::rename_intro_courses(db)?;
    println!("Rows affected: {}", affected);
    output::show_records(&catalog::list_courses(&*db)?);

    output::heading("Create and fill semesters with a script");
    db.atomically(|batch| batch.execute_script(&seed::semesters_script()))?;
    output::show_records(&catalog::list_semesters(&*db)?);

    output::heading("Create and fill enrollment");
    db.atomically(|batch| {
        schema::create_enrollment(batch)?;
        batch.execute_many(
            catalog::INSERT_ENROLLMENT,
            seed::enrollment().iter().map(|e| e.to_row()),
        )
    })?;
    output::show_records(&catalog::list_enrollment(&*db)?);

    output::heading("Join the tables through a view");
    schema::create_summary_view(&*db)?;
    output::show_records(&catalog::list_summary(&*db)?);

    output::heading("Filter the view: prefix pai, terms 124x");
    output::show_records(&catalog::summary_for(&*db, "pai", "124%")?);

    output::heading("Read the view into a frame");
    let summary = tabular::read_frame(&*db, "SELECT * FROM summary", &[])?;
    output::print_frame(&summary, "table")?;

    output::heading("Append a frame to enrollment");
    let extra = seed::extra_enrollment_frame()?;
    output::print_frame(&extra, "table")?;
    let appended = tabular::write_frame(db, &extra, "enrollment", IfExists::Append)?;
    println!("Rows affected: {}", appended);
    let cursor = db.execute("SELECT * FROM enrollment;", &[])?;
    output::show_rows(cursor.rows());

    // Terms 1231 and 1232 have no semester row, so the view leaves them out.
    println!(
        "enrollment rows: {}, summary rows: {}",
        db.row_count("enrollment")?,
        db.row_count("summary")?
    );

    output::heading("Total enrollment per course and term");
    output::show_records(&catalog::enrollment_totals(&*db)?);

    output::heading("Schema of the working database");
    let master = tabular::read_frame(&*db, "SELECT type, name, tbl_name FROM sqlite_master;", &[])?;
    output::print_frame(&master, "table")?;

    Ok(())
}
