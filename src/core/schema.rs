//! Table and view definitions.
//!
//! Every `create_*` function drops a same-named object first, so running it
//! again yields an empty object with no rows left from a previous run.

use super::database::{Database, Executor};
use crate::Result;

pub const COURSES_DDL: &str = "
    CREATE TABLE courses (
        prefix VARCHAR NOT NULL,
        number INT NOT NULL,
        name VARCHAR NOT NULL,
        PRIMARY KEY (prefix, number)
    );";

pub const SEMESTERS_DDL: &str = "
    CREATE TABLE semesters (
        term INT PRIMARY KEY NOT NULL,
        year INT NOT NULL,
        name VARCHAR NOT NULL
    );";

pub const ENROLLMENT_DDL: &str = "
    CREATE TABLE enrollment (
        prefix VARCHAR NOT NULL,
        number INT NOT NULL,
        sec VARCHAR NOT NULL,
        term INT NOT NULL,
        count INT, -- unknown seat counts stay NULL
        UNIQUE (prefix, number, sec, term)
    );";

/// Enrollment joined with its term and course. Inner joins: enrollment rows
/// without a matching course or term do not appear.
pub const SUMMARY_DDL: &str = "
    CREATE VIEW summary AS
        SELECT E.prefix, E.number, E.sec, E.term, S.name || ' ' || S.year AS term_desc, C.name, E.count
            FROM enrollment AS E
            JOIN semesters AS S ON E.term = S.term
            JOIN courses AS C ON E.prefix = C.prefix AND E.number = C.number;";

pub fn create_courses(db: &impl Executor) -> Result<()> {
    db.execute("DROP TABLE IF EXISTS courses", &[])?;
    db.execute(COURSES_DDL, &[])?;
    Ok(())
}

pub fn create_semesters(db: &impl Executor) -> Result<()> {
    db.execute("DROP TABLE IF EXISTS semesters", &[])?;
    db.execute(SEMESTERS_DDL, &[])?;
    Ok(())
}

pub fn create_enrollment(db: &impl Executor) -> Result<()> {
    db.execute_script(&format!("DROP TABLE IF EXISTS enrollment;{}", ENROLLMENT_DDL))
}

pub fn create_summary_view(db: &impl Executor) -> Result<()> {
    db.execute_script(&format!("DROP VIEW IF EXISTS summary;{}", SUMMARY_DDL))
}

/// Create all three tables and the view in one batch.
pub fn create_all(db: &mut Database) -> Result<()> {
    db.atomically(|batch| {
        create_courses(batch)?;
        create_semesters(batch)?;
        create_enrollment(batch)?;
        create_summary_view(batch)
    })?;
    tracing::info!("Schema created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_all_defines_every_object() {
        let mut db = Database::open_in_memory().unwrap();
        create_all(&mut db).unwrap();

        for table in ["courses", "semesters", "enrollment"] {
            assert!(db.table_exists(table).unwrap(), "missing table {}", table);
        }
        assert!(!db.table_exists("summary").unwrap());
        assert_eq!(db.row_count("summary").unwrap(), 0);
    }

    #[test]
    fn test_failed_ddl_leaves_no_partial_schema() {
        let mut db = Database::open_in_memory().unwrap();
        let result = db.atomically(|batch| {
            create_courses(batch)?;
            batch.execute_script("CREATE TABLE broken (")
        });
        assert!(result.is_err());
        assert!(!db.table_exists("courses").unwrap());
    }
}
