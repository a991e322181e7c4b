//! Course catalog reads and writes.
//!
//! Writes take the [`Database`] and run as one batch each; reads take any
//! [`Executor`] and always see the latest committed state.

use super::database::{Database, Executor};
use crate::models::catalog::{
    Course, Enrollment, EnrollmentTotal, PrefixCount, Semester, SummaryRow,
};
use crate::models::frame::Datum;
use crate::Result;
use rusqlite::{params_from_iter, Row};

pub const INSERT_COURSE: &str = "INSERT INTO courses VALUES (?,?,?);";
pub const INSERT_SEMESTER: &str = "INSERT INTO semesters VALUES (?,?,?);";
pub const INSERT_ENROLLMENT: &str = "INSERT INTO enrollment VALUES (?,?,?,?,?);";

/// Insert one course.
pub fn insert_course(db: &mut Database, course: &Course) -> Result<usize> {
    db.atomically(|batch| {
        let cursor = batch.execute(INSERT_COURSE, &course.to_row())?;
        Ok(cursor.rowcount().unwrap_or(0))
    })
}

/// Insert several courses. Either all are stored or none is.
pub fn insert_courses(db: &mut Database, courses: &[Course]) -> Result<usize> {
    db.atomically(|batch| batch.execute_many(INSERT_COURSE, courses.iter().map(Course::to_row)))
}

pub fn insert_semesters(db: &mut Database, semesters: &[Semester]) -> Result<usize> {
    db.atomically(|batch| {
        batch.execute_many(INSERT_SEMESTER, semesters.iter().map(Semester::to_row))
    })
}

pub fn insert_enrollment(db: &mut Database, rows: &[Enrollment]) -> Result<usize> {
    db.atomically(|batch| batch.execute_many(INSERT_ENROLLMENT, rows.iter().map(Enrollment::to_row)))
}

/// Spell out "Intro" as "Introduction" at the start of course names.
pub fn rename_intro_courses(db: &mut Database) -> Result<usize> {
    db.atomically(|batch| {
        let cursor = batch.execute(
            "UPDATE courses SET name = REPLACE(name, 'Intro ', 'Introduction ')
                 WHERE name LIKE 'Intro %';",
            &[],
        )?;
        Ok(cursor.rowcount().unwrap_or(0))
    })
}

fn query<T>(
    db: &impl Executor,
    sql: &str,
    params: &[Datum],
    map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
    let mut stmt = db.connection().prepare(sql)?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), map)?
        .collect::<rusqlite::Result<Vec<T>>>()?;
    Ok(rows)
}

/// All courses ordered by prefix and number.
pub fn list_courses(db: &impl Executor) -> Result<Vec<Course>> {
    query(
        db,
        "SELECT * FROM courses ORDER BY prefix, number;",
        &[],
        Course::from_row,
    )
}

pub fn find_course(db: &impl Executor, prefix: &str, number: i64) -> Result<Option<Course>> {
    let mut found = query(
        db,
        "SELECT * FROM courses WHERE prefix = ? AND number = ?;",
        &[Datum::from(prefix), Datum::from(number)],
        Course::from_row,
    )?;
    Ok(found.pop())
}

pub fn list_semesters(db: &impl Executor) -> Result<Vec<Semester>> {
    query(
        db,
        "SELECT * FROM semesters ORDER BY term;",
        &[],
        Semester::from_row,
    )
}

pub fn list_enrollment(db: &impl Executor) -> Result<Vec<Enrollment>> {
    query(
        db,
        "SELECT * FROM enrollment ORDER BY term, prefix, number, sec;",
        &[],
        Enrollment::from_row,
    )
}

/// Number of courses per prefix.
pub fn count_by_prefix(db: &impl Executor) -> Result<Vec<PrefixCount>> {
    query(
        db,
        "SELECT prefix, count(*) AS count FROM courses GROUP BY prefix ORDER BY prefix;",
        &[],
        |row| {
            Ok(PrefixCount {
                prefix: row.get("prefix")?,
                count: row.get("count")?,
            })
        },
    )
}

/// Enrollment summed over sections per (prefix, number, term). Unknown counts add nothing.
pub fn enrollment_totals(db: &impl Executor) -> Result<Vec<EnrollmentTotal>> {
    query(
        db,
        "SELECT prefix, number, term, coalesce(sum(count), 0) AS total
             FROM enrollment
             GROUP BY prefix, number, term
             ORDER BY prefix, number, term;",
        &[],
        |row| {
            Ok(EnrollmentTotal {
                prefix: row.get("prefix")?,
                number: row.get("number")?,
                term: row.get("term")?,
                total: row.get("total")?,
            })
        },
    )
}

pub fn list_summary(db: &impl Executor) -> Result<Vec<SummaryRow>> {
    query(
        db,
        "SELECT * FROM summary ORDER BY term, prefix, number, sec;",
        &[],
        SummaryRow::from_row,
    )
}

/// Summary rows for one prefix whose term code matches a LIKE pattern such as `124%`.
pub fn summary_for(db: &impl Executor, prefix: &str, term_pattern: &str) -> Result<Vec<SummaryRow>> {
    query(
        db,
        "SELECT * FROM summary WHERE prefix = ? AND term LIKE ? ORDER BY term, number, sec;",
        &[Datum::from(prefix), Datum::from(term_pattern)],
        SummaryRow::from_row,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema;

    fn catalog_db() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        schema::create_all(&mut db).unwrap();
        db
    }

    #[test]
    fn test_insert_and_find_course() {
        let mut db = catalog_db();
        let course = Course::new("pai", 789, "Advanced Policy Analysis");
        assert_eq!(insert_course(&mut db, &course).unwrap(), 1);
        assert_eq!(find_course(&db, "pai", 789).unwrap(), Some(course));
        assert_eq!(find_course(&db, "pai", 1).unwrap(), None);
    }

    #[test]
    fn test_rename_only_touches_intro_prefix() {
        let mut db = catalog_db();
        insert_courses(
            &mut db,
            &[
                Course::new("pai", 721, "Intro to Statistics"),
                Course::new("pai", 999, "Not an Intro course"),
            ],
        )
        .unwrap();
        assert_eq!(rename_intro_courses(&mut db).unwrap(), 1);
        let names: Vec<String> = list_courses(&db).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Introduction to Statistics", "Not an Intro course"]);
    }
}
