use crate::domain::model::{Enrollment, NewEnrollment};
use crate::domain::ports::{CommitOutcome, EnrollReadSet, EnrollmentStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory enrollment store with compare-and-swap semantics.
///
/// Every course and teacher carries a version stamp that advances on any
/// write touching it (insert or delete). `read_for_enroll` snapshots the
/// stamps; `commit_enrollment` only lands while both stamps are
/// unchanged, which gives per-course serializability without locks held
/// across await points.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    enrollments: HashMap<String, Enrollment>,
    course_versions: HashMap<String, u64>,
    teacher_versions: HashMap<String, u64>,
    next_id: u64,
}

impl Inner {
    fn course_version(&self, course_id: &str) -> u64 {
        self.course_versions.get(course_id).copied().unwrap_or(0)
    }

    fn teacher_version(&self, teacher_id: &str) -> u64 {
        self.teacher_versions.get(teacher_id).copied().unwrap_or(0)
    }

    fn bump(&mut self, teacher_id: &str, course_id: &str) {
        *self
            .course_versions
            .entry(course_id.to_string())
            .or_insert(0) += 1;
        *self
            .teacher_versions
            .entry(teacher_id.to_string())
            .or_insert(0) += 1;
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentStore for MemoryStore {
    async fn read_for_enroll(&self, teacher_id: &str, course_id: &str) -> Result<EnrollReadSet> {
        let inner = self.inner.read().await;

        let teacher_enrollments: Vec<Enrollment> = inner
            .enrollments
            .values()
            .filter(|e| e.teacher_id == teacher_id)
            .cloned()
            .collect();
        let course_count = inner
            .enrollments
            .values()
            .filter(|e| e.course_id == course_id)
            .count() as u32;

        Ok(EnrollReadSet {
            teacher_enrollments,
            course_count,
            course_version: inner.course_version(course_id),
            teacher_version: inner.teacher_version(teacher_id),
        })
    }

    async fn commit_enrollment(
        &self,
        read: &EnrollReadSet,
        new: NewEnrollment,
    ) -> Result<CommitOutcome> {
        let mut inner = self.inner.write().await;

        if inner.course_version(&new.course_id) != read.course_version
            || inner.teacher_version(&new.teacher_id) != read.teacher_version
        {
            return Ok(CommitOutcome::Conflict);
        }

        let id = format!("enr-{:06}", inner.next_id);
        inner.next_id += 1;

        let enrollment = Enrollment {
            id: id.clone(),
            teacher_id: new.teacher_id.clone(),
            course_id: new.course_id.clone(),
            registration_code: new.registration_code,
            enrolled_at: Utc::now(),
        };

        inner.enrollments.insert(id, enrollment.clone());
        inner.bump(&new.teacher_id, &new.course_id);

        Ok(CommitOutcome::Committed(enrollment))
    }

    async fn delete(&self, enrollment_id: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;

        match inner.enrollments.remove(enrollment_id) {
            Some(removed) => {
                // Advance the stamps so in-flight commits re-read the
                // freed seat.
                inner.bump(&removed.teacher_id, &removed.course_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn enrollments_for_teacher(&self, teacher_id: &str) -> Result<Vec<Enrollment>> {
        let inner = self.inner.read().await;
        let mut enrollments: Vec<Enrollment> = inner
            .enrollments
            .values()
            .filter(|e| e.teacher_id == teacher_id)
            .cloned()
            .collect();
        enrollments.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(enrollments)
    }

    async fn count_for_course(&self, course_id: &str) -> Result<u32> {
        let inner = self.inner.read().await;
        Ok(inner
            .enrollments
            .values()
            .filter(|e| e.course_id == course_id)
            .count() as u32)
    }
}
