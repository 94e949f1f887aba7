use crate::config::EngineConfig;
use crate::core::codegen::CodeGenerator;
use crate::core::validator::{self, EnrollmentCheck};
use crate::domain::model::{Course, Enrollment, EnrollmentView, NewEnrollment};
use crate::domain::ports::{CatalogReader, CommitOutcome, EnrollmentStore};
use crate::utils::error::{EnrollError, Rejection, Result};

/// Performs admission checks and enrollment writes atomically against the
/// shared store.
///
/// The crux is re-validation inside the transaction boundary: every
/// attempt re-reads the teacher's enrollments and the course's live count
/// together with version stamps, re-runs the full validator against those
/// fresh values, and only then commits with compare-and-swap. Two racing
/// enrollments can both observe "29 of 30 seats taken", but only one CAS
/// commit lands; the loser re-reads, re-validates, and sees `CourseFull`.
pub struct Coordinator<C: CatalogReader, S: EnrollmentStore> {
    catalog: C,
    store: S,
    config: EngineConfig,
    codes: CodeGenerator,
}

impl<C: CatalogReader, S: EnrollmentStore> Coordinator<C, S> {
    pub fn new(catalog: C, store: S, config: EngineConfig) -> Self {
        let codes = CodeGenerator::new(config.code_prefix.clone(), config.code_year);
        Self {
            catalog,
            store,
            config,
            codes,
        }
    }

    /// Enroll a teacher in a course. On success returns the committed
    /// enrollment carrying its registration code; on rejection returns
    /// the typed reason with nothing written.
    ///
    /// The whole call, retries included, is bounded by the configured
    /// operation timeout and aborts cleanly with no partial write.
    pub async fn enroll(&self, teacher_id: &str, course_id: &str) -> Result<Enrollment> {
        tokio::time::timeout(
            self.config.op_timeout(),
            self.enroll_inner(teacher_id, course_id),
        )
        .await
        .map_err(|_| EnrollError::Timeout)?
    }

    async fn enroll_inner(&self, teacher_id: &str, course_id: &str) -> Result<Enrollment> {
        self.resolve_teacher(teacher_id).await?;
        let course = self.resolve_course(course_id).await?;

        for attempt in 1..=self.config.max_retries {
            // The transaction read-set: enrollments and count are read
            // together with the version stamps the commit will check.
            let read = self.store.read_for_enroll(teacher_id, course_id).await?;
            let current = self.held_courses(&read.teacher_enrollments).await?;

            validator::validate(&EnrollmentCheck {
                course: &course,
                current: &current,
                course_count: read.course_count,
                quota: self.config.quota,
                period_exclusive: self.config.period_exclusive,
            })?;

            // Seat ordinal from the in-transaction count, never from a
            // pre-flight read.
            let registration_code = self.codes.generate(&course, read.course_count + 1);
            let new = NewEnrollment {
                teacher_id: teacher_id.to_string(),
                course_id: course_id.to_string(),
                registration_code,
            };

            match self.store.commit_enrollment(&read, new).await? {
                CommitOutcome::Committed(enrollment) => {
                    tracing::info!(
                        teacher_id,
                        course_id,
                        code = %enrollment.registration_code,
                        "enrollment committed"
                    );
                    return Ok(enrollment);
                }
                CommitOutcome::Conflict => {
                    tracing::debug!(teacher_id, course_id, attempt, "write conflict, retrying");
                }
            }
        }

        Err(EnrollError::TransientConflict {
            attempts: self.config.max_retries,
        })
    }

    /// Non-authoritative admissibility check for instant UI feedback.
    /// Runs the same validator as the transactional path, but against a
    /// plain read: the counts can change before `enroll` commits.
    pub async fn validate_preflight(&self, teacher_id: &str, course_id: &str) -> Result<()> {
        self.resolve_teacher(teacher_id).await?;
        let course = self.resolve_course(course_id).await?;

        let read = self.store.read_for_enroll(teacher_id, course_id).await?;
        let current = self.held_courses(&read.teacher_enrollments).await?;

        validator::validate(&EnrollmentCheck {
            course: &course,
            current: &current,
            course_count: read.course_count,
            quota: self.config.quota,
            period_exclusive: self.config.period_exclusive,
        })
    }

    /// Remove an enrollment, restoring capacity. Unconditional: deletion
    /// only ever frees seats, so it needs no validation pass. Counts are
    /// derived from live records; the next enroll simply reads one fewer.
    pub async fn unenroll(&self, enrollment_id: &str) -> Result<()> {
        if self.store.delete(enrollment_id).await? {
            tracing::info!(enrollment_id, "enrollment removed");
            Ok(())
        } else {
            Err(EnrollError::EnrollmentNotFound {
                enrollment_id: enrollment_id.to_string(),
            })
        }
    }

    /// The "my courses" view: the teacher's enrollments joined with
    /// catalog data.
    pub async fn enrollments_for_teacher(&self, teacher_id: &str) -> Result<Vec<EnrollmentView>> {
        self.resolve_teacher(teacher_id).await?;
        let enrollments = self.store.enrollments_for_teacher(teacher_id).await?;

        let mut views = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let course = self.catalog.get_course(&enrollment.course_id).await?;
            views.push(EnrollmentView { enrollment, course });
        }
        Ok(views)
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>> {
        self.catalog.list_courses().await
    }

    /// Live enrollment count for a course. Display only; admission uses
    /// the in-transaction read.
    pub async fn seats_taken(&self, course_id: &str) -> Result<u32> {
        self.store.count_for_course(course_id).await
    }

    async fn resolve_teacher(&self, teacher_id: &str) -> Result<()> {
        match self.catalog.get_teacher(teacher_id).await? {
            Some(_) => Ok(()),
            None => Err(Rejection::TeacherNotFound {
                teacher_id: teacher_id.to_string(),
            }
            .into()),
        }
    }

    async fn resolve_course(&self, course_id: &str) -> Result<Course> {
        self.catalog
            .get_course(course_id)
            .await?
            .ok_or_else(|| {
                Rejection::CourseNotFound {
                    course_id: course_id.to_string(),
                }
                .into()
            })
    }

    /// Resolve the courses behind a teacher's current enrollments. An
    /// enrollment pointing at a course the catalog no longer lists is a
    /// referential break that must be corrected, not skipped.
    async fn held_courses(&self, enrollments: &[Enrollment]) -> Result<Vec<Course>> {
        let mut courses = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let course = self
                .catalog
                .get_course(&enrollment.course_id)
                .await?
                .ok_or_else(|| EnrollError::CatalogFormat {
                    message: format!(
                        "enrollment {} references unknown course {}",
                        enrollment.id, enrollment.course_id
                    ),
                })?;
            courses.push(course);
        }
        Ok(courses)
    }
}
