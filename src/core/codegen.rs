use crate::domain::model::Course;

/// Builds the human-readable registration code issued to an accepted
/// enrollment: `"<prefix>-<course-sequence>-<year>-<seat-ordinal>"`, e.g.
/// `TNM-054-07-2026-12`.
///
/// The seat ordinal is the in-transaction live course count plus one. It
/// must come from the committing transaction's own read, never from a
/// pre-flight count, so racing enrollments cannot be issued the same seat.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    prefix: String,
    year: i32,
}

impl CodeGenerator {
    pub fn new(prefix: impl Into<String>, year: i32) -> Self {
        Self {
            prefix: prefix.into(),
            year,
        }
    }

    pub fn generate(&self, course: &Course, seat_ordinal: u32) -> String {
        format!(
            "{}-{:02}-{}-{:02}",
            self.prefix, course.sequence, self.year, seat_ordinal
        )
    }
}
