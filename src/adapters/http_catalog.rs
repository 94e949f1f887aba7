use crate::adapters::catalog_rows::{self, CourseRow, TeacherRow};
use crate::domain::model::{Course, Teacher};
use crate::domain::ports::CatalogReader;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Catalog served by a JSON endpoint publishing
/// `{ "courses": [...], "teachers": [...] }` (the spreadsheet-backed
/// script endpoint used by several deployments). Fetched per call; the
/// endpoint is the source of truth and its rows go through the same
/// normalization as the CSV catalog.
#[derive(Debug)]
pub struct HttpCatalog {
    client: Client,
    endpoint: String,
    default_capacity: u32,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    courses: Vec<CourseRow>,
    #[serde(default)]
    teachers: Vec<TeacherRow>,
}

impl HttpCatalog {
    pub fn new(endpoint: impl Into<String>, default_capacity: u32) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            default_capacity,
        }
    }

    async fn fetch(&self) -> Result<(Vec<Course>, Vec<Teacher>)> {
        tracing::debug!("fetching catalog from: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;
        tracing::debug!("catalog response status: {}", response.status());

        let document: CatalogDocument = response.error_for_status()?.json().await?;

        let mut courses = Vec::with_capacity(document.courses.len());
        for row in document.courses {
            courses.push(catalog_rows::normalize_course(row, self.default_capacity)?);
        }

        let mut teachers = Vec::with_capacity(document.teachers.len());
        for row in document.teachers {
            teachers.push(catalog_rows::normalize_teacher(row)?);
        }

        Ok((courses, teachers))
    }
}

#[async_trait]
impl CatalogReader for HttpCatalog {
    async fn get_course(&self, course_id: &str) -> Result<Option<Course>> {
        let (courses, _) = self.fetch().await?;
        Ok(courses.into_iter().find(|c| c.id == course_id))
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        let (mut courses, _) = self.fetch().await?;
        courses.sort_by_key(|c| c.sequence);
        Ok(courses)
    }

    async fn get_teacher(&self, teacher_id: &str) -> Result<Option<Teacher>> {
        let (_, teachers) = self.fetch().await?;
        Ok(teachers.into_iter().find(|t| t.id == teacher_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EnrollError;
    use httpmock::prelude::*;

    fn catalog_json() -> serde_json::Value {
        serde_json::json!({
            "courses": [
                {
                    "id": "c1",
                    "sequence": 7,
                    "name": "Docker para docentes",
                    "date": "2026-01-13",
                    "date_label": "13 y 14 de enero",
                    "hours": "09:00 a 15:00",
                    "period": "PERIODO 1"
                }
            ],
            "teachers": [
                {
                    "id": "t1",
                    "full_name": "Maria Lopez",
                    "curp": "LOMA800101MDFXXX01",
                    "email": "maria.lopez@itd.edu.mx"
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_fetch_and_normalize() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/catalog");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(catalog_json());
        });

        let catalog = HttpCatalog::new(server.url("/catalog"), 30);

        let course = catalog.get_course("c1").await.unwrap().unwrap();
        assert_eq!(course.capacity, 30);
        assert_eq!(course.schedule.hours, "09:00 a 15:00");

        let teacher = catalog.get_teacher("t1").await.unwrap().unwrap();
        assert_eq!(teacher.email, "maria.lopez@itd.edu.mx");

        assert!(catalog.get_course("ghost").await.unwrap().is_none());
        mock.assert_hits(3);
    }

    #[tokio::test]
    async fn test_server_error_surfaces() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/catalog");
            then.status(500);
        });

        let catalog = HttpCatalog::new(server.url("/catalog"), 30);
        let err = catalog.list_courses().await.unwrap_err();
        assert!(matches!(err, EnrollError::Http(_)));
    }
}
