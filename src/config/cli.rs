use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cupo")]
#[command(about = "Enrollment engine for teacher course registration")]
pub struct Cli {
    #[arg(long, default_value = "./cupo.toml")]
    pub config: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog courses with live seat counts
    Courses,
    /// Check admissibility without enrolling (non-authoritative)
    Preflight {
        teacher_id: String,
        course_id: String,
    },
    /// Enroll a teacher in a course
    Enroll {
        teacher_id: String,
        course_id: String,
    },
    /// Remove an enrollment, freeing its seat
    Unenroll { enrollment_id: String },
    /// Show a teacher's current enrollments
    MyCourses { teacher_id: String },
}
