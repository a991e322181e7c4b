//! End-to-end test of the walkthrough command.

use coursedb::cli::commands::{demo, schema};
use coursedb::core::{catalog, Database, Executor};
use tempfile::TempDir;

#[test]
fn test_demo_leaves_expected_state() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("demo.db");

    demo::run(&database, &dir.path().join("eia.db"), None).unwrap();

    let db = Database::open_read_only(&database).unwrap();
    assert_eq!(db.row_count("courses").unwrap(), 6);
    assert_eq!(catalog::find_course(&db, "pai", 338).unwrap(), None);
    assert_eq!(db.row_count("semesters").unwrap(), 4);
    assert_eq!(db.row_count("enrollment").unwrap(), 10);
    assert_eq!(db.row_count("summary").unwrap(), 8);
}

#[test]
fn test_demo_runs_twice() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("demo.db");

    demo::run(&database, &dir.path().join("eia.db"), None).unwrap();
    demo::run(&database, &dir.path().join("eia.db"), None).unwrap();

    let db = Database::open_read_only(&database).unwrap();
    assert_eq!(db.row_count("enrollment").unwrap(), 10);
}

#[test]
fn test_schema_command_with_seed() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("seeded.db");

    schema::recreate(&database, true).unwrap();

    let db = Database::open_read_only(&database).unwrap();
    assert_eq!(db.row_count("courses").unwrap(), 6);
    assert_eq!(db.row_count("summary").unwrap(), 8);
    let pst = catalog::find_course(&db, "pst", 101).unwrap().unwrap();
    assert!(pst.name.starts_with("Introduction"));
}
