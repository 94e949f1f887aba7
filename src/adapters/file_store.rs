use crate::domain::model::{Enrollment, NewEnrollment};
use crate::domain::ports::{CommitOutcome, EnrollReadSet, EnrollmentStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Enrollment store persisted to a JSON file, for the stand-alone CLI.
///
/// Same compare-and-swap contract as the in-memory store; version stamps
/// are process-local (the CLI is the only writer of its file), while the
/// records themselves survive restarts. Writes go to a sibling temp file
/// first and are renamed into place so a crash never leaves a torn file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    enrollments: HashMap<String, Enrollment>,
    course_versions: HashMap<String, u64>,
    teacher_versions: HashMap<String, u64>,
    next_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    next_id: u64,
    enrollments: Vec<Enrollment>,
}

impl JsonFileStore {
    /// Open the store, loading any records already on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut inner = Inner::default();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let file: StoreFile = serde_json::from_str(&content)?;
            inner.next_id = file.next_id;
            for enrollment in file.enrollments {
                inner.enrollments.insert(enrollment.id.clone(), enrollment);
            }
            tracing::debug!(
                path = %path.display(),
                records = inner.enrollments.len(),
                "loaded enrollment store"
            );
        }

        Ok(Self {
            path,
            inner: Mutex::new(inner),
        })
    }

    fn persist(&self, inner: &Inner) -> Result<()> {
        let mut enrollments: Vec<Enrollment> = inner.enrollments.values().cloned().collect();
        enrollments.sort_by(|a, b| a.id.cmp(&b.id));

        let file = StoreFile {
            next_id: inner.next_id,
            enrollments,
        };
        let json = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
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

#[async_trait]
impl EnrollmentStore for JsonFileStore {
    async fn read_for_enroll(&self, teacher_id: &str, course_id: &str) -> Result<EnrollReadSet> {
        let inner = self.inner.lock().await;

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
        let mut inner = self.inner.lock().await;

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
        self.persist(&inner)?;

        Ok(CommitOutcome::Committed(enrollment))
    }

    async fn delete(&self, enrollment_id: &str) -> Result<bool> {
        let mut inner = self.inner.lock().await;

        match inner.enrollments.remove(enrollment_id) {
            Some(removed) => {
                inner.bump(&removed.teacher_id, &removed.course_id);
                self.persist(&inner)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn enrollments_for_teacher(&self, teacher_id: &str) -> Result<Vec<Enrollment>> {
        let inner = self.inner.lock().await;
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
        let inner = self.inner.lock().await;
        Ok(inner
            .enrollments
            .values()
            .filter(|e| e.course_id == course_id)
            .count() as u32)
    }
}
