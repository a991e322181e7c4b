//! Course catalog data model.

use super::frame::Datum;
use rusqlite::Row;

/// A course catalog entry, keyed by (prefix, number).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub prefix: String,
    pub number: i64,
    pub name: String,
}

impl Course {
    pub fn new(prefix: &str, number: i64, name: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            number,
            name: name.to_string(),
        }
    }

    /// Statement parameters in table column order.
    pub fn to_row(&self) -> Vec<Datum> {
        vec![
            self.prefix.as_str().into(),
            self.number.into(),
            self.name.as_str().into(),
        ]
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            prefix: row.get("prefix")?,
            number: row.get("number")?,
            name: row.get("name")?,
        })
    }
}

/// An academic term. The term code encodes the year and season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semester {
    pub term: i64,
    pub year: i64,
    pub name: String,
}

impl Semester {
    pub fn new(term: i64, year: i64, name: &str) -> Self {
        Self {
            term,
            year,
            name: name.to_string(),
        }
    }

    pub fn to_row(&self) -> Vec<Datum> {
        vec![self.term.into(), self.year.into(), self.name.as_str().into()]
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            term: row.get("term")?,
            year: row.get("year")?,
            name: row.get("name")?,
        })
    }

    /// Human readable description, e.g. "Spring 2024".
    pub fn description(&self) -> String {
        format!("{} {}", self.name, self.year)
    }
}

/// Seat count of one section of a course in a term. `count` is `None` when unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub prefix: String,
    pub number: i64,
    pub sec: String,
    pub term: i64,
    pub count: Option<i64>,
}

impl Enrollment {
    pub fn new(prefix: &str, number: i64, sec: &str, term: i64, count: i64) -> Self {
        Self {
            prefix: prefix.to_string(),
            number,
            sec: sec.to_string(),
            term,
            count: Some(count),
        }
    }

    pub fn to_row(&self) -> Vec<Datum> {
        vec![
            self.prefix.as_str().into(),
            self.number.into(),
            self.sec.as_str().into(),
            self.term.into(),
            self.count.into(),
        ]
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            prefix: row.get("prefix")?,
            number: row.get("number")?,
            sec: row.get("sec")?,
            term: row.get("term")?,
            count: row.get("count")?,
        })
    }
}

/// One row of the `summary` view: an enrollment joined with its term and course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub prefix: String,
    pub number: i64,
    pub sec: String,
    pub term: i64,
    pub term_desc: String,
    pub name: String,
    pub count: Option<i64>,
}

impl SummaryRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            prefix: row.get("prefix")?,
            number: row.get("number")?,
            sec: row.get("sec")?,
            term: row.get("term")?,
            term_desc: row.get("term_desc")?,
            name: row.get("name")?,
            count: row.get("count")?,
        })
    }
}

/// Number of courses sharing a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixCount {
    pub prefix: String,
    pub count: i64,
}

/// Enrollment summed over sections for one course in one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentTotal {
    pub prefix: String,
    pub number: i64,
    pub term: i64,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_row_order() {
        let course = Course::new("pai", 789, "Advanced Policy Analysis");
        assert_eq!(
            course.to_row(),
            vec![
                Datum::Text("pai".to_string()),
                Datum::Integer(789),
                Datum::Text("Advanced Policy Analysis".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_enrollment_count_is_null() {
        let mut enrollment = Enrollment::new("pst", 101, "M009", 1242, 0);
        enrollment.count = None;
        assert_eq!(enrollment.to_row()[4], Datum::Null);
    }

    #[test]
    fn test_semester_description() {
        assert_eq!(Semester::new(1242, 2024, "Spring").description(), "Spring 2024");
    }
}
