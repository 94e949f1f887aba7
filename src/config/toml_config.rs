use crate::config::EngineConfig;
use crate::utils::error::{EnrollError, Result};
use crate::utils::validation::{validate_path, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Deployment configuration loaded from a TOML file: engine rules plus
/// where the catalog and the enrollment store live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogConfig {
    /// Course and teacher directories as CSV files on disk.
    Csv {
        courses_path: String,
        teachers_path: String,
    },
    /// A JSON endpoint publishing `{ "courses": [...], "teachers": [...] }`.
    Http { endpoint: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file the enrollment records persist to.
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    "./enrollments.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EnrollError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EnrollError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` occurrences with the environment value,
    /// leaving unknown variables untouched.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.engine.validate()?;

        match &self.catalog {
            CatalogConfig::Csv {
                courses_path,
                teachers_path,
            } => {
                validate_path("catalog.courses_path", courses_path)?;
                validate_path("catalog.teachers_path", teachers_path)?;
            }
            CatalogConfig::Http { endpoint } => {
                validate_url("catalog.endpoint", endpoint)?;
            }
        }

        validate_path("store.path", &self.store.path)?;
        Ok(())
    }
}
