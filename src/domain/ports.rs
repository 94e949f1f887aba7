use crate::domain::model::{Course, Enrollment, NewEnrollment, Teacher};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only view over the course catalog and teacher directory. The
/// backing store is unspecified: CSV files, a JSON endpoint, or a
/// document database are all valid implementations.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn get_course(&self, course_id: &str) -> Result<Option<Course>>;
    async fn list_courses(&self) -> Result<Vec<Course>>;
    async fn get_teacher(&self, teacher_id: &str) -> Result<Option<Teacher>>;
}

/// Everything an enroll decision depends on, read together and stamped
/// with the store versions it was observed at. The version stamps form
/// the transaction's read-set: a commit is only accepted while both are
/// still current.
#[derive(Debug, Clone)]
pub struct EnrollReadSet {
    pub teacher_enrollments: Vec<Enrollment>,
    pub course_count: u32,
    pub course_version: u64,
    pub teacher_version: u64,
}

/// Outcome of a compare-and-swap commit attempt.
#[derive(Debug, Clone)]
pub enum CommitOutcome {
    /// The record was written; the store assigned id and timestamp.
    Committed(Enrollment),
    /// A concurrent transaction touched the same course or teacher
    /// between read and commit. The caller re-reads and retries.
    Conflict,
}

/// Shared enrollment store. All mutation goes through the coordinator;
/// the contract here is optimistic concurrency: `read_for_enroll`
/// captures version stamps and `commit_enrollment` only succeeds while
/// those stamps are unchanged. Deleting an enrollment also advances the
/// stamps so racing commits re-read.
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Read the teacher's enrollments and the course's live count in one
    /// consistent snapshot.
    async fn read_for_enroll(&self, teacher_id: &str, course_id: &str) -> Result<EnrollReadSet>;

    /// Atomically insert `new` if the versions observed in `read` are
    /// still current, otherwise report `Conflict` without writing.
    async fn commit_enrollment(
        &self,
        read: &EnrollReadSet,
        new: NewEnrollment,
    ) -> Result<CommitOutcome>;

    /// Delete an enrollment. Returns `false` when no record with that id
    /// exists. Deletion only ever frees capacity, so it needs no
    /// read-set of its own.
    async fn delete(&self, enrollment_id: &str) -> Result<bool>;

    async fn enrollments_for_teacher(&self, teacher_id: &str) -> Result<Vec<Enrollment>>;

    async fn count_for_course(&self, course_id: &str) -> Result<u32>;
}
