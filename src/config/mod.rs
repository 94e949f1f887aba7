#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rule and retry knobs for the enrollment engine. Every field has the
/// default observed across the registration-form deployments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Per-teacher enrollment quota.
    #[serde(default = "default_quota")]
    pub quota: u32,

    /// Capacity assumed for catalog rows that omit one.
    #[serde(default = "default_capacity")]
    pub default_capacity: u32,

    /// Program prefix of registration codes, e.g. `TNM-054`.
    #[serde(default = "default_code_prefix")]
    pub code_prefix: String,

    /// Year segment of registration codes. Defaults to the current UTC
    /// year.
    #[serde(default = "default_code_year")]
    pub code_year: i32,

    /// When set, a teacher may hold at most one course per period tag.
    #[serde(default)]
    pub period_exclusive: bool,

    /// How many times a write conflict is retried before surfacing
    /// `TransientConflict`.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Overall bound on a single enroll/unenroll call, retries included.
    #[serde(default = "default_op_timeout_ms")]
    pub op_timeout_ms: u64,
}

fn default_quota() -> u32 {
    3
}

fn default_capacity() -> u32 {
    30
}

fn default_code_prefix() -> String {
    "TNM-054".to_string()
}

fn default_code_year() -> i32 {
    Utc::now().year()
}

fn default_max_retries() -> u32 {
    5
}

fn default_op_timeout_ms() -> u64 {
    5_000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quota: default_quota(),
            default_capacity: default_capacity(),
            code_prefix: default_code_prefix(),
            code_year: default_code_year(),
            period_exclusive: false,
            max_retries: default_max_retries(),
            op_timeout_ms: default_op_timeout_ms(),
        }
    }
}

impl EngineConfig {
    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.op_timeout_ms)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("engine.quota", self.quota as usize, 1)?;
        validate_positive_number("engine.default_capacity", self.default_capacity as usize, 1)?;
        validate_non_empty_string("engine.code_prefix", &self.code_prefix)?;
        validate_range("engine.code_year", self.code_year, 2000, 2100)?;
        validate_range("engine.max_retries", self.max_retries, 1, 100)?;
        validate_positive_number("engine.op_timeout_ms", self.op_timeout_ms as usize, 1)?;
        Ok(())
    }
}
