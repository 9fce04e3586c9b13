use crate::adapters::source::{FileProductSource, HttpProductSource, SampleProductSource};
use crate::domain::ports::ProductSource;
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::{validate_path, validate_required_field, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_DELAY_MS: u64 = 150;
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Simulated latency of the sample source.
    pub delay_ms: Option<u64>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Sample,
    File,
    Http,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub r#type: SourceKind,
    pub path: Option<String>,
    pub endpoint: Option<String>,
}

impl ShopConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShopError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ShopError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShopError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.loader.delay_ms.unwrap_or(DEFAULT_DELAY_MS))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.loader.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    /// Builds the configured product source. Call `validate` first.
    pub fn build_source(&self) -> Result<Arc<dyn ProductSource>> {
        let source: Arc<dyn ProductSource> = match self.source.r#type {
            SourceKind::Sample => Arc::new(SampleProductSource::new(self.load_delay())),
            SourceKind::File => {
                let path = validate_required_field("source.path", &self.source.path)?;
                Arc::new(FileProductSource::new(path))
            }
            SourceKind::Http => {
                let endpoint = validate_required_field("source.endpoint", &self.source.endpoint)?;
                Arc::new(HttpProductSource::new(endpoint.as_str(), self.request_timeout())?)
            }
        };
        Ok(source)
    }
}

impl Validate for ShopConfig {
    fn validate(&self) -> Result<()> {
        match self.source.r#type {
            SourceKind::Sample => {}
            SourceKind::File => {
                let path = validate_required_field("source.path", &self.source.path)?;
                validate_path("source.path", path)?;
            }
            SourceKind::Http => {
                let endpoint = validate_required_field("source.endpoint", &self.source.endpoint)?;
                validate_url("source.endpoint", endpoint)?;
            }
        }

        if self.loader.timeout_seconds == Some(0) {
            return Err(ShopError::InvalidConfigValueError {
                field: "loader.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
