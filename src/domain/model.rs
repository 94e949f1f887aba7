use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A teacher as published by the directory. Created by the external
/// registration flow; read-only to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub full_name: String,
    /// National personal-identity code, 18 fixed-length characters.
    pub curp: String,
    pub email: String,
}

/// When a course meets: the calendar date it recurs on plus the raw time
/// range as published in the catalog, e.g. `"09:00 a 15:00"`.
///
/// The time text is kept verbatim; it is parsed into minutes-since-midnight
/// by the conflict checker, which turns unparsable text into a hard
/// `MalformedSchedule` error instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub date: NaiveDate,
    pub hours: String,
}

/// A catalog course. Created by catalog administration; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    /// Short numeric code, the `XX` segment of the registration code.
    pub sequence: u32,
    pub name: String,
    /// Human-readable date-range label shown in confirmations.
    pub date_label: String,
    pub schedule: Schedule,
    /// Seats available. Per-course, defaulting to 30 when the catalog
    /// omits it.
    pub capacity: u32,
    /// Optional grouping tag ("PERIODO 1", "PERIODO 2"). Only enforced
    /// when period-exclusive mode is enabled.
    pub period: Option<String>,
}

/// A committed enrollment linking one teacher to one course.
///
/// Created only through the coordinator's transactional commit and
/// destroyed only through unenrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: String,
    pub teacher_id: String,
    pub course_id: String,
    pub registration_code: String,
    pub enrolled_at: DateTime<Utc>,
}

/// An enrollment about to be committed. The store assigns the id and
/// timestamp at commit time.
#[derive(Debug, Clone)]
pub struct NewEnrollment {
    pub teacher_id: String,
    pub course_id: String,
    pub registration_code: String,
}

/// An enrollment joined with its course for the "my courses" view. The
/// course is `None` when the catalog no longer lists it.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentView {
    pub enrollment: Enrollment,
    pub course: Option<Course>,
}
