use crate::adapters::catalog_rows::{self, CourseRow, TeacherRow};
use crate::domain::model::{Course, Teacher};
use crate::domain::ports::CatalogReader;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

/// Catalog backed by the published CSV directories (`cursos.csv`,
/// `docentes.csv`). Loaded eagerly at startup; malformed rows reject the
/// whole load so a broken directory is noticed at boot, not at the first
/// affected enrollment.
#[derive(Debug)]
pub struct CsvCatalog {
    courses: HashMap<String, Course>,
    teachers: HashMap<String, Teacher>,
}

impl CsvCatalog {
    pub fn open<P: AsRef<Path>>(
        courses_path: P,
        teachers_path: P,
        default_capacity: u32,
    ) -> Result<Self> {
        let mut courses = HashMap::new();
        let mut reader = csv::Reader::from_path(courses_path.as_ref())?;
        for row in reader.deserialize::<CourseRow>() {
            let course = catalog_rows::normalize_course(row?, default_capacity)?;
            courses.insert(course.id.clone(), course);
        }

        let mut teachers = HashMap::new();
        let mut reader = csv::Reader::from_path(teachers_path.as_ref())?;
        for row in reader.deserialize::<TeacherRow>() {
            let teacher = catalog_rows::normalize_teacher(row?)?;
            teachers.insert(teacher.id.clone(), teacher);
        }

        tracing::debug!(
            courses = courses.len(),
            teachers = teachers.len(),
            "loaded CSV catalog"
        );

        Ok(Self { courses, teachers })
    }
}

#[async_trait]
impl CatalogReader for CsvCatalog {
    async fn get_course(&self, course_id: &str) -> Result<Option<Course>> {
        Ok(self.courses.get(course_id).cloned())
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        let mut courses: Vec<Course> = self.courses.values().cloned().collect();
        courses.sort_by_key(|c| c.sequence);
        Ok(courses)
    }

    async fn get_teacher(&self, teacher_id: &str) -> Result<Option<Teacher>> {
        Ok(self.teachers.get(teacher_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EnrollError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const COURSES_CSV: &str = "\
id,sequence,name,date,date_label,hours,capacity,period
c1,7,Docker para docentes,2026-01-13,13 y 14 de enero,09:00 a 15:00,,PERIODO 1
c2,12,Evaluación por competencias,2026-01-13,13 de enero,15:00 a 17:00,25,PERIODO 2
";

    const TEACHERS_CSV: &str = "\
id,full_name,curp,email
t1,Maria Lopez,LOMA800101MDFXXX01,maria.lopez@itd.edu.mx
";

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_open_and_lookup() {
        let courses = write_temp(COURSES_CSV);
        let teachers = write_temp(TEACHERS_CSV);

        let catalog = CsvCatalog::open(courses.path(), teachers.path(), 30).unwrap();

        let c1 = catalog.get_course("c1").await.unwrap().unwrap();
        assert_eq!(c1.sequence, 7);
        assert_eq!(c1.capacity, 30); // blank column takes the default
        assert_eq!(c1.period.as_deref(), Some("PERIODO 1"));

        let c2 = catalog.get_course("c2").await.unwrap().unwrap();
        assert_eq!(c2.capacity, 25);

        let listed = catalog.list_courses().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, "c1"); // ordered by sequence

        let teacher = catalog.get_teacher("t1").await.unwrap().unwrap();
        assert_eq!(teacher.full_name, "Maria Lopez");
        assert!(catalog.get_teacher("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_date_rejects_load() {
        let courses = write_temp(
            "id,sequence,name,date,date_label,hours,capacity,period\n\
             c1,7,Curso,enero 13,13 de enero,09:00 a 15:00,,\n",
        );
        let teachers = write_temp(TEACHERS_CSV);

        let err = CsvCatalog::open(courses.path(), teachers.path(), 30).unwrap_err();
        assert!(matches!(err, EnrollError::CatalogFormat { .. }));
    }

    #[tokio::test]
    async fn test_missing_column_rejects_load() {
        let courses = write_temp("id,name\nc1,Curso\n");
        let teachers = write_temp(TEACHERS_CSV);

        let err = CsvCatalog::open(courses.path(), teachers.path(), 30).unwrap_err();
        assert!(matches!(err, EnrollError::Csv(_)));
    }
}
