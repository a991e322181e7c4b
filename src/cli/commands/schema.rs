//! Schema command implementation.

use crate::core::{catalog, schema, seed, Database, Executor};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Recreate the catalog tables and view, optionally loading the walkthrough data.
pub fn recreate(database: &Path, with_seed: bool) -> Result<()> {
    let mut db = Database::open(database)
        .with_context(|| format!("Failed to open database: {}", database.display()))?;

    schema::create_all(&mut db).context("Failed to create schema")?;
    println!("{} Schema created in {}", "[OK]".green(), database.display());

    if with_seed {
        seed_all(&mut db)?;
        for table in ["courses", "semesters", "enrollment", "summary"] {
            println!("  {} {}", format!("{}:", table).bold(), db.row_count(table)?);
        }
    }

    db.close()?;
    Ok(())
}

/// Load the walkthrough data that ends up committed, without the failing batch.
pub fn seed_all(db: &mut Database) -> Result<()> {
    let mut courses = seed::single_courses();
    courses.extend(seed::bulk_courses());
    catalog::insert_courses(db, &courses)?;
    catalog::rename_intro_courses(db)?;
    catalog::insert_semesters(db, &seed::semesters())?;
    catalog::insert_enrollment(db, &seed::enrollment())?;
    tracing::info!("Seed data loaded");
    Ok(())
}
