use thiserror::Error;

/// Admissibility failures. These are user-facing rejections of an enroll
/// request: no rule retry can help, the UI renders a distinct message per
/// variant. They carry enough detail (conflicting course name, window) to
/// explain the rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("course not found: {course_id}")]
    CourseNotFound { course_id: String },

    #[error("teacher not found: {teacher_id}")]
    TeacherNotFound { teacher_id: String },

    #[error("enrollment limit of {quota} courses reached")]
    QuotaExceeded { quota: u32 },

    #[error("already enrolled in course {course_id}")]
    DuplicateEnrollment { course_id: String },

    #[error("already enrolled in a {period} course: {other_course}")]
    PeriodConflict {
        period: String,
        other_course: String,
    },

    #[error("schedule overlaps with \"{other_course}\" ({other_window})")]
    ScheduleConflict {
        other_course: String,
        other_window: String,
    },

    #[error("course {course_id} has no seats left (capacity {capacity})")]
    CourseFull { course_id: String, capacity: u32 },
}

#[derive(Error, Debug)]
pub enum EnrollError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Catalog data-quality failure: a course's published time range
    /// could not be parsed. Never treated as "no conflict"; the catalog
    /// row must be corrected.
    #[error("malformed schedule for course {course_id}: {raw:?}")]
    MalformedSchedule { course_id: String, raw: String },

    /// Concurrent-write contention that outlasted the retry budget. No
    /// rule was violated; the caller may simply try again.
    #[error("enrollment contended after {attempts} attempts, please retry")]
    TransientConflict { attempts: u32 },

    #[error("enrollment operation timed out")]
    Timeout,

    #[error("enrollment not found: {enrollment_id}")]
    EnrollmentNotFound { enrollment_id: String },

    /// A catalog row failed the explicit mapping step (missing column,
    /// unparsable date or sequence).
    #[error("catalog row rejected: {message}")]
    CatalogFormat { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl EnrollError {
    /// The typed rejection, when this error is one. Lets callers branch
    /// on admissibility failures without matching the whole taxonomy.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            EnrollError::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EnrollError>;
