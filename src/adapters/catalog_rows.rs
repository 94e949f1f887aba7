use crate::domain::model::{Course, Schedule, Teacher};
use crate::utils::error::{EnrollError, Result};
use serde::Deserialize;

// The one explicit schema for external course/teacher directories. Both
// the CSV and the HTTP catalogs deserialize into these rows and run the
// same normalization, so a malformed row fails the same way everywhere
// instead of being papered over by key-guessing.

#[derive(Debug, Deserialize)]
pub struct CourseRow {
    pub id: String,
    pub sequence: u32,
    pub name: String,
    /// ISO calendar date the course recurs on, e.g. `2026-01-13`.
    pub date: String,
    /// Human-readable date range shown in confirmations.
    pub date_label: String,
    /// Raw time range as published, e.g. `"09:00 a 15:00"`.
    pub hours: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TeacherRow {
    pub id: String,
    pub full_name: String,
    pub curp: String,
    pub email: String,
}

pub fn normalize_course(row: CourseRow, default_capacity: u32) -> Result<Course> {
    let reject = |message: String| EnrollError::CatalogFormat { message };

    if row.id.trim().is_empty() {
        return Err(reject("course row with empty id".to_string()));
    }
    if row.name.trim().is_empty() {
        return Err(reject(format!("course {} has an empty name", row.id)));
    }

    let date = row
        .date
        .trim()
        .parse()
        .map_err(|e| reject(format!("course {} has unparsable date {:?}: {}", row.id, row.date, e)))?;

    let capacity = match row.capacity {
        Some(0) => {
            return Err(reject(format!("course {} declares zero capacity", row.id)));
        }
        Some(n) => n,
        None => default_capacity,
    };

    let period = row
        .period
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    Ok(Course {
        id: row.id.trim().to_string(),
        sequence: row.sequence,
        name: row.name.trim().to_string(),
        date_label: row.date_label.trim().to_string(),
        schedule: Schedule {
            date,
            hours: row.hours.trim().to_string(),
        },
        capacity,
        period,
    })
}

pub fn normalize_teacher(row: TeacherRow) -> Result<Teacher> {
    if row.id.trim().is_empty() {
        return Err(EnrollError::CatalogFormat {
            message: "teacher row with empty id".to_string(),
        });
    }

    Ok(Teacher {
        id: row.id.trim().to_string(),
        full_name: row.full_name.trim().to_string(),
        curp: row.curp.trim().to_string(),
        email: row.email.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CourseRow {
        CourseRow {
            id: "c1".to_string(),
            sequence: 7,
            name: "Docker para docentes".to_string(),
            date: "2026-01-13".to_string(),
            date_label: "13 y 14 de enero".to_string(),
            hours: "09:00 a 15:00".to_string(),
            capacity: None,
            period: Some("PERIODO 1".to_string()),
        }
    }

    #[test]
    fn test_capacity_defaults() {
        let course = normalize_course(row(), 30).unwrap();
        assert_eq!(course.capacity, 30);

        let explicit = normalize_course(
            CourseRow {
                capacity: Some(12),
                ..row()
            },
            30,
        )
        .unwrap();
        assert_eq!(explicit.capacity, 12);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err = normalize_course(
            CourseRow {
                capacity: Some(0),
                ..row()
            },
            30,
        )
        .unwrap_err();
        assert!(matches!(err, EnrollError::CatalogFormat { .. }));
    }

    #[test]
    fn test_unparsable_date_is_rejected() {
        let err = normalize_course(
            CourseRow {
                date: "13 de enero".to_string(),
                ..row()
            },
            30,
        )
        .unwrap_err();
        assert!(matches!(err, EnrollError::CatalogFormat { .. }));
    }

    #[test]
    fn test_blank_period_becomes_none() {
        let course = normalize_course(
            CourseRow {
                period: Some("  ".to_string()),
                ..row()
            },
            30,
        )
        .unwrap();
        assert_eq!(course.period, None);
    }
}
