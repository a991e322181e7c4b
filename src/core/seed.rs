//! Walkthrough data.

use crate::models::catalog::{Course, Enrollment, Semester};
use crate::models::frame::Frame;
use crate::Result;

/// Courses inserted one statement at a time.
pub fn single_courses() -> Vec<Course> {
    vec![
        Course::new("pai", 789, "Advanced Policy Analysis"),
        Course::new("pai", 723, "Economics for Public Decisions"),
    ]
}

/// Courses inserted with one bulk call.
pub fn bulk_courses() -> Vec<Course> {
    vec![
        Course::new("pst", 101, "Intro to Analysis of Public Policy"),
        Course::new("pai", 305, "Policy Implementation"),
        Course::new("pai", 721, "Intro to Statistics"),
        Course::new("pai", 722, "Quantitative Analysis"),
    ]
}

/// A batch with one new course and one already present. It fails as a whole.
pub fn conflicting_courses() -> Vec<Course> {
    vec![
        Course::new("pai", 338, "US Intelligence Community"),
        Course::new("pai", 722, "Quantitative Analysis"),
    ]
}

pub fn semesters() -> Vec<Semester> {
    vec![
        Semester::new(1242, 2024, "Spring"),
        Semester::new(1251, 2024, "Fall"),
        Semester::new(1252, 2025, "Spring"),
        Semester::new(1261, 2025, "Fall"),
    ]
}

/// Script that recreates the semesters table and fills it.
pub fn semesters_script() -> String {
    let mut script = format!("DROP TABLE IF EXISTS semesters;{}\n", super::schema::SEMESTERS_DDL);
    for s in semesters() {
        script.push_str(&format!(
            "INSERT INTO semesters VALUES ({},{},'{}');\n",
            s.term,
            s.year,
            s.name.replace('\'', "''")
        ));
    }
    script
}

pub fn enrollment() -> Vec<Enrollment> {
    vec![
        Enrollment::new("pst", 101, "M001", 1242, 96),
        Enrollment::new("pst", 101, "M001", 1251, 158),
        Enrollment::new("pst", 101, "M001", 1252, 140),
        Enrollment::new("pai", 722, "M001", 1242, 32),
        Enrollment::new("pai", 722, "M002", 1242, 35),
        Enrollment::new("pai", 722, "M005", 1242, 25),
        Enrollment::new("pai", 789, "M001", 1242, 31),
        Enrollment::new("pai", 789, "M001", 1252, 35),
    ]
}

/// Frame of extra enrollment rows appended to the table at the end of the walkthrough.
pub fn extra_enrollment_frame() -> Result<Frame> {
    Frame::from_rows(
        ["prefix", "number", "sec", "term", "count"],
        vec![
            Enrollment::new("pst", 101, "M001", 1231, 131).to_row(),
            Enrollment::new("pst", 101, "M001", 1232, 87).to_row(),
        ],
    )
}
