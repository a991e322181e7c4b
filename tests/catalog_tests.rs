//! Integration tests for catalog queries.
//!
//! Tests cover:
//! - Grouped counts per prefix
//! - Summed enrollment per course and term
//! - The summary view as an inner join
//! - Pattern filters on the view
//! - Reads after appending rows with unknown counts

use coursedb::core::tabular::{write_frame, IfExists};
use coursedb::core::{catalog, schema, seed, Database, Executor};
use coursedb::models::frame::{Datum, Frame};
use coursedb::models::catalog::{Course, Enrollment, EnrollmentTotal, PrefixCount};
use tempfile::TempDir;

// ========== TEST FIXTURES ==========

/// Database in the state the walkthrough reaches before the frame append.
fn walkthrough_db(dir: &TempDir) -> Database {
    let mut db = Database::create_fresh(&dir.path().join("catalog.db")).unwrap();
    schema::create_all(&mut db).unwrap();
    catalog::insert_courses(&mut db, &seed::single_courses()).unwrap();
    catalog::insert_courses(&mut db, &seed::bulk_courses()).unwrap();
    let err = catalog::insert_courses(&mut db, &seed::conflicting_courses()).unwrap_err();
    assert!(err.is_integrity(), "{}", err);
    catalog::rename_intro_courses(&mut db).unwrap();
    db.atomically(|batch| batch.execute_script(&seed::semesters_script()))
        .unwrap();
    catalog::insert_enrollment(&mut db, &seed::enrollment()).unwrap();
    db
}

// ========== AGGREGATE TESTS ==========

#[test]
fn test_count_by_prefix() {
    let dir = TempDir::new().unwrap();
    let db = walkthrough_db(&dir);

    let counts = catalog::count_by_prefix(&db).unwrap();
    assert_eq!(
        counts,
        vec![
            PrefixCount { prefix: "pai".to_string(), count: 5 },
            PrefixCount { prefix: "pst".to_string(), count: 1 },
        ]
    );
}

#[test]
fn test_count_by_prefix_tracks_inserts() {
    let dir = TempDir::new().unwrap();
    let mut db = walkthrough_db(&dir);
    catalog::insert_course(&mut db, &Course::new("pst", 102, "Ethics")).unwrap();

    let counts = catalog::count_by_prefix(&db).unwrap();
    assert_eq!(counts[1].count, 2);
}

#[test]
fn test_enrollment_totals_sum_sections() {
    let dir = TempDir::new().unwrap();
    let db = walkthrough_db(&dir);

    let totals = catalog::enrollment_totals(&db).unwrap();
    assert_eq!(totals.len(), 6);
    assert!(totals.contains(&EnrollmentTotal {
        prefix: "pai".to_string(),
        number: 722,
        term: 1242,
        total: 92,
    }));
    assert!(totals.contains(&EnrollmentTotal {
        prefix: "pst".to_string(),
        number: 101,
        term: 1251,
        total: 158,
    }));
}

#[test]
fn test_rename_intro_courses() {
    let dir = TempDir::new().unwrap();
    let db = walkthrough_db(&dir);

    let pst = catalog::find_course(&db, "pst", 101).unwrap().unwrap();
    assert_eq!(pst.name, "Introduction to Analysis of Public Policy");
    let stats = catalog::find_course(&db, "pai", 721).unwrap().unwrap();
    assert_eq!(stats.name, "Introduction to Statistics");
}

// ========== VIEW TESTS ==========

#[test]
fn test_summary_joins_every_matched_row() {
    let dir = TempDir::new().unwrap();
    let db = walkthrough_db(&dir);

    let summary = catalog::list_summary(&db).unwrap();
    assert_eq!(summary.len(), 8);

    let first = summary
        .iter()
        .find(|r| r.prefix == "pai" && r.number == 789 && r.term == 1252)
        .unwrap();
    assert_eq!(first.term_desc, "Spring 2025");
    assert_eq!(first.name, "Advanced Policy Analysis");
    assert_eq!(first.count, Some(35));
}

#[test]
fn test_summary_excludes_unmatched_rows() {
    let dir = TempDir::new().unwrap();
    let mut db = walkthrough_db(&dir);

    catalog::insert_enrollment(
        &mut db,
        &[
            // Unknown term
            Enrollment::new("pst", 101, "M001", 1231, 131),
            // Unknown course
            Enrollment::new("pai", 999, "M001", 1242, 10),
            // Both known
            Enrollment::new("pai", 723, "M001", 1261, 20),
        ],
    )
    .unwrap();

    assert_eq!(db.row_count("enrollment").unwrap(), 11);
    assert_eq!(db.row_count("summary").unwrap(), 9);

    let matched: i64 = db
        .execute(
            "SELECT count(*) FROM enrollment AS E
                 WHERE EXISTS (SELECT 1 FROM courses AS C WHERE C.prefix = E.prefix AND C.number = E.number)
                   AND EXISTS (SELECT 1 FROM semesters AS S WHERE S.term = E.term)",
            &[],
        )
        .unwrap()
        .rows()[0][0]
        .as_integer()
        .unwrap();
    assert_eq!(matched, db.row_count("summary").unwrap());
}

#[test]
fn test_summary_reflects_data_changes_without_rebuild() {
    let dir = TempDir::new().unwrap();
    let mut db = walkthrough_db(&dir);
    catalog::insert_course(&mut db, &Course::new("pai", 999, "New Course")).unwrap();
    catalog::insert_enrollment(&mut db, &[Enrollment::new("pai", 999, "M001", 1261, 5)]).unwrap();

    let rows = catalog::summary_for(&db, "pai", "126%").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].term_desc, "Fall 2025");
}

#[test]
fn test_summary_filter_by_prefix_and_term_pattern() {
    let dir = TempDir::new().unwrap();
    let db = walkthrough_db(&dir);

    let rows = catalog::summary_for(&db, "pai", "124%").unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.prefix == "pai" && r.term == 1242));
}

// ========== UNKNOWN COUNT TESTS ==========

#[test]
fn test_reads_survive_append_without_count() {
    let dir = TempDir::new().unwrap();
    let mut db = walkthrough_db(&dir);
    let frame = Frame::from_rows(
        ["prefix", "number", "sec", "term"],
        vec![vec![Datum::from("pst"), Datum::from(101), Datum::from("M009"), Datum::from(1242)]],
    )
    .unwrap();

    assert_eq!(write_frame(&mut db, &frame, "enrollment", IfExists::Append).unwrap(), 1);

    let enrollment = catalog::list_enrollment(&db).unwrap();
    assert_eq!(enrollment.len(), 9);
    assert!(enrollment.iter().any(|e| e.sec == "M009" && e.count.is_none()));

    let summary = catalog::summary_for(&db, "pst", "1242").unwrap();
    assert_eq!(summary.len(), 2);
    assert!(summary.iter().any(|r| r.sec == "M009" && r.count.is_none()));

    let totals = catalog::enrollment_totals(&db).unwrap();
    assert!(totals.contains(&EnrollmentTotal {
        prefix: "pst".to_string(),
        number: 101,
        term: 1242,
        total: 96,
    }));
}

#[test]
fn test_append_without_key_column_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut db = walkthrough_db(&dir);
    let frame = Frame::from_rows(
        ["prefix", "number", "term", "count"],
        vec![vec![Datum::from("pst"), Datum::from(101), Datum::from(1242), Datum::from(12)]],
    )
    .unwrap();

    let err = write_frame(&mut db, &frame, "enrollment", IfExists::Append).unwrap_err();
    assert!(err.is_integrity(), "{}", err);
    assert_eq!(catalog::list_enrollment(&db).unwrap().len(), 8);
}
