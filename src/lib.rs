pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use config::EngineConfig;
pub use core::coordinator::Coordinator;
pub use utils::error::{EnrollError, Rejection, Result};
