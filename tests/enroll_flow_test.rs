use cupo::adapters::csv_catalog::CsvCatalog;
use cupo::adapters::memory::MemoryStore;
use cupo::{Coordinator, EngineConfig, EnrollError, Rejection};
use std::io::Write;
use tempfile::NamedTempFile;

const COURSES_CSV: &str = "\
id,sequence,name,date,date_label,hours,capacity,period
c1,7,Docker para docentes,2026-01-13,13 y 14 de enero,09:00 a 15:00,,PERIODO 1
c2,12,Evaluación por competencias,2026-01-13,13 de enero,10:00 a 12:00,,PERIODO 1
c3,3,Redacción de artículos,2026-01-13,13 de enero,15:00 a 17:00,,PERIODO 2
c4,9,Taller de tutorías,2026-01-20,20 de enero,09:00 a 13:00,2,PERIODO 2
";

fn teachers_csv(count: usize) -> String {
    let mut csv = String::from("id,full_name,curp,email\n");
    for i in 1..=count {
        csv.push_str(&format!(
            "t{i},Docente {i},AAAA000000AAAAAA0{i:02},docente{i}@itd.edu.mx\n"
        ));
    }
    csv
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn engine_config() -> EngineConfig {
    EngineConfig {
        code_year: 2026,
        ..EngineConfig::default()
    }
}

fn coordinator(teachers: usize, config: EngineConfig) -> Coordinator<CsvCatalog, MemoryStore> {
    let courses = write_temp(COURSES_CSV);
    let teachers_file = write_temp(&teachers_csv(teachers));
    let catalog = CsvCatalog::open(courses.path(), teachers_file.path(), 30).unwrap();
    Coordinator::new(catalog, MemoryStore::new(), config)
}

#[tokio::test]
async fn test_full_registration_flow() {
    let coordinator = coordinator(3, engine_config());

    // The form lists the catalog, preflights the selection, then enrolls.
    let courses = coordinator.list_courses().await.unwrap();
    assert_eq!(courses.len(), 4);

    coordinator.validate_preflight("t1", "c1").await.unwrap();
    let enrollment = coordinator.enroll("t1", "c1").await.unwrap();
    assert_eq!(enrollment.registration_code, "TNM-054-07-2026-01");

    let views = coordinator.enrollments_for_teacher("t1").await.unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(
        views[0].course.as_ref().unwrap().name,
        "Docker para docentes"
    );

    // Overlapping window on the same date is rejected with detail.
    let err = coordinator.enroll("t1", "c2").await.unwrap_err();
    match err.rejection() {
        Some(Rejection::ScheduleConflict {
            other_course,
            other_window,
        }) => {
            assert_eq!(other_course, "Docker para docentes");
            assert_eq!(other_window, "09:00-15:00");
        }
        other => panic!("unexpected rejection: {:?}", other),
    }

    // A window starting exactly when the held one ends is allowed.
    coordinator.enroll("t1", "c3").await.unwrap();
}

#[tokio::test]
async fn test_unenroll_frees_the_pair() {
    let coordinator = coordinator(1, engine_config());

    let enrollment = coordinator.enroll("t1", "c1").await.unwrap();
    coordinator.unenroll(&enrollment.id).await.unwrap();

    let views = coordinator.enrollments_for_teacher("t1").await.unwrap();
    assert!(views.is_empty());

    // Re-enrolling the same pair is not a duplicate.
    coordinator.enroll("t1", "c1").await.unwrap();
}

#[tokio::test]
async fn test_capacity_fills_to_the_exact_seat() {
    let coordinator = coordinator(3, engine_config());

    // c4 holds two seats.
    let first = coordinator.enroll("t1", "c4").await.unwrap();
    let second = coordinator.enroll("t2", "c4").await.unwrap();
    assert!(first.registration_code.ends_with("-01"));
    assert!(second.registration_code.ends_with("-02"));

    let err = coordinator.enroll("t3", "c4").await.unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(&Rejection::CourseFull {
            course_id: "c4".to_string(),
            capacity: 2
        })
    );
    assert_eq!(coordinator.seats_taken("c4").await.unwrap(), 2);
}

#[tokio::test]
async fn test_period_exclusive_mode() {
    let config = EngineConfig {
        period_exclusive: true,
        ..engine_config()
    };
    let coordinator = coordinator(1, config);

    coordinator.enroll("t1", "c1").await.unwrap();

    // c4 is PERIODO 2, a different period and date: fine.
    coordinator.enroll("t1", "c4").await.unwrap();

    // c2 shares PERIODO 1 with c1; the period rule fires before the
    // schedule check.
    let err = coordinator.enroll("t1", "c2").await.unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(&Rejection::PeriodConflict {
            period: "PERIODO 1".to_string(),
            other_course: "Docker para docentes".to_string()
        })
    );
}

#[tokio::test]
async fn test_malformed_catalog_hours_surface_at_enroll() {
    let courses = write_temp(
        "id,sequence,name,date,date_label,hours,capacity,period\n\
         c1,7,Curso,2026-01-13,13 de enero,por definir,,\n",
    );
    let teachers_file = write_temp(&teachers_csv(1));
    let catalog = CsvCatalog::open(courses.path(), teachers_file.path(), 30).unwrap();
    let coordinator = Coordinator::new(catalog, MemoryStore::new(), engine_config());

    let err = coordinator.enroll("t1", "c1").await.unwrap_err();
    assert!(matches!(err, EnrollError::MalformedSchedule { .. }));
    assert_eq!(coordinator.seats_taken("c1").await.unwrap(), 0);
}
