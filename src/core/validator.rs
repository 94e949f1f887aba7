use crate::core::schedule::{self, ScheduleWindow};
use crate::domain::model::Course;
use crate::utils::error::{Rejection, Result};

/// Everything an admissibility decision needs, already resolved against
/// the catalog and the store. Course and teacher existence are checked by
/// the caller while resolving; the remaining ordered rules live here.
#[derive(Debug)]
pub struct EnrollmentCheck<'a> {
    /// The candidate course.
    pub course: &'a Course,
    /// Courses the teacher currently holds enrollments in.
    pub current: &'a [Course],
    /// Live enrollment count for the candidate course.
    pub course_count: u32,
    /// Per-teacher enrollment quota.
    pub quota: u32,
    /// Whether two enrollments may not share a period tag.
    pub period_exclusive: bool,
}

/// Ordered admissibility rules; the first failing rule wins, matching the
/// user-facing precedence of the registration form:
/// quota, duplicate, period (when enabled), schedule overlap, capacity.
///
/// Deliberately side-effect-free. It runs twice per enrollment: once
/// optimistically for instant feedback, and once more against
/// freshly-read counts inside the coordinator's transaction, because the
/// counts can change between the two.
pub fn validate(check: &EnrollmentCheck<'_>) -> Result<()> {
    let course = check.course;

    if check.current.len() as u32 >= check.quota {
        return Err(Rejection::QuotaExceeded { quota: check.quota }.into());
    }

    if check.current.iter().any(|c| c.id == course.id) {
        return Err(Rejection::DuplicateEnrollment {
            course_id: course.id.clone(),
        }
        .into());
    }

    if check.period_exclusive {
        if let Some(period) = &course.period {
            if let Some(held) = check
                .current
                .iter()
                .find(|c| c.period.as_deref() == Some(period.as_str()))
            {
                return Err(Rejection::PeriodConflict {
                    period: period.clone(),
                    other_course: held.name.clone(),
                }
                .into());
            }
        }
    }

    let candidate = ScheduleWindow::for_course(course)?;
    for held in check.current {
        let held_window = ScheduleWindow::for_course(held)?;
        if schedule::conflicts(&candidate, &held_window) {
            return Err(Rejection::ScheduleConflict {
                other_course: held.name.clone(),
                other_window: held_window.label(),
            }
            .into());
        }
    }

    if check.course_count >= course.capacity {
        return Err(Rejection::CourseFull {
            course_id: course.id.clone(),
            capacity: course.capacity,
        }
        .into());
    }

    Ok(())
}
