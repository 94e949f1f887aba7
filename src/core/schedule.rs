use crate::domain::model::Course;
use crate::utils::error::{EnrollError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// A course time window normalized for comparison: the calendar date plus
/// start/end as minutes since midnight. Only same-day comparisons are
/// meaningful, so time-of-day is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub date: NaiveDate,
    pub start_min: u16,
    pub end_min: u16,
}

fn time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2}):(\d{2})").unwrap())
}

impl ScheduleWindow {
    /// Parse a catalog time range like `"09:00 a 15:00"` or `"9:00 - 15:00"`
    /// into a window. The first two `HH:MM` occurrences are taken as start
    /// and end, matching how every catalog variant publishes its hours.
    ///
    /// Unparsable text, out-of-range clock values, or an empty/backwards
    /// range are hard errors: silently admitting two overlapping
    /// unparsable courses is the more dangerous failure mode.
    pub fn parse(course_id: &str, date: NaiveDate, hours: &str) -> Result<Self> {
        let malformed = || EnrollError::MalformedSchedule {
            course_id: course_id.to_string(),
            raw: hours.to_string(),
        };

        let mut minutes = Vec::with_capacity(2);
        for caps in time_re().captures_iter(hours).take(2) {
            let h: u16 = caps[1].parse().map_err(|_| malformed())?;
            let m: u16 = caps[2].parse().map_err(|_| malformed())?;
            if h > 23 || m > 59 {
                return Err(malformed());
            }
            minutes.push(h * 60 + m);
        }

        let (&start_min, &end_min) = match (minutes.first(), minutes.get(1)) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(malformed()),
        };

        if start_min >= end_min {
            return Err(malformed());
        }

        Ok(ScheduleWindow {
            date,
            start_min,
            end_min,
        })
    }

    pub fn for_course(course: &Course) -> Result<Self> {
        Self::parse(&course.id, course.schedule.date, &course.schedule.hours)
    }

    /// `"HH:MM-HH:MM"` label for rejection messages.
    pub fn label(&self) -> String {
        format!(
            "{:02}:{:02}-{:02}:{:02}",
            self.start_min / 60,
            self.start_min % 60,
            self.end_min / 60,
            self.end_min % 60
        )
    }
}

/// Half-open interval overlap on the same date. A window ending exactly
/// when another starts is NOT a conflict: adjacency is allowed, overlap
/// is not.
pub fn conflicts(a: &ScheduleWindow, b: &ScheduleWindow) -> bool {
    a.date == b.date && a.start_min < b.end_min && a.end_min > b.start_min
}
