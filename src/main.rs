use anyhow::Context;
use clap::Parser;
use cupo::adapters::csv_catalog::CsvCatalog;
use cupo::adapters::file_store::JsonFileStore;
use cupo::adapters::http_catalog::HttpCatalog;
use cupo::config::cli::{Cli, Command};
use cupo::config::toml_config::{CatalogConfig, TomlConfig};
use cupo::domain::ports::CatalogReader;
use cupo::utils::{logger, validation::Validate};
use cupo::Coordinator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting cupo");

    let config = TomlConfig::from_file(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config))?;

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let store = JsonFileStore::open(&config.store.path)
        .with_context(|| format!("opening enrollment store at {}", config.store.path))?;

    match &config.catalog {
        CatalogConfig::Csv {
            courses_path,
            teachers_path,
        } => {
            let catalog = CsvCatalog::open(
                courses_path.as_str(),
                teachers_path.as_str(),
                config.engine.default_capacity,
            )
            .context("loading CSV catalog")?;
            run(
                Coordinator::new(catalog, store, config.engine.clone()),
                cli.command,
            )
            .await
        }
        CatalogConfig::Http { endpoint } => {
            let catalog = HttpCatalog::new(endpoint.clone(), config.engine.default_capacity);
            run(
                Coordinator::new(catalog, store, config.engine.clone()),
                cli.command,
            )
            .await
        }
    }
}

async fn run<C: CatalogReader>(
    coordinator: Coordinator<C, JsonFileStore>,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Courses => {
            for course in coordinator.list_courses().await? {
                let taken = coordinator.seats_taken(&course.id).await?;
                let period = course.period.as_deref().unwrap_or("-");
                println!(
                    "{:<8} [{:02}] {:<40} {} {} | {} | {}/{} seats",
                    course.id,
                    course.sequence,
                    course.name,
                    course.date_label,
                    course.schedule.hours,
                    period,
                    taken,
                    course.capacity
                );
            }
        }
        Command::Preflight {
            teacher_id,
            course_id,
        } => match coordinator.validate_preflight(&teacher_id, &course_id).await {
            Ok(()) => println!("OK: {} can enroll in {}", teacher_id, course_id),
            Err(e) => {
                eprintln!("Rejected: {}", e);
                std::process::exit(1);
            }
        },
        Command::Enroll {
            teacher_id,
            course_id,
        } => match coordinator.enroll(&teacher_id, &course_id).await {
            Ok(enrollment) => {
                println!("Enrolled. Registration code: {}", enrollment.registration_code);
                println!("Enrollment id: {}", enrollment.id);
            }
            Err(e) => {
                tracing::error!("enrollment failed: {}", e);
                eprintln!("Rejected: {}", e);
                std::process::exit(1);
            }
        },
        Command::Unenroll { enrollment_id } => match coordinator.unenroll(&enrollment_id).await {
            Ok(()) => println!("Enrollment {} removed", enrollment_id),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        Command::MyCourses { teacher_id } => {
            let views = coordinator.enrollments_for_teacher(&teacher_id).await?;
            if views.is_empty() {
                println!("No enrollments for {}", teacher_id);
            }
            for view in views {
                match view.course {
                    Some(course) => println!(
                        "{} {} | {} {} | {}",
                        view.enrollment.id,
                        view.enrollment.registration_code,
                        course.name,
                        course.date_label,
                        course.schedule.hours
                    ),
                    None => println!(
                        "{} {} | course {} no longer in catalog",
                        view.enrollment.id,
                        view.enrollment.registration_code,
                        view.enrollment.course_id
                    ),
                }
            }
        }
    }

    Ok(())
}
