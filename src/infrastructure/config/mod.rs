use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "enrichment.toml";
pub const ENV_PREFIX: &str = "ENRICHMENT_";

/// Service configuration: defaults, then `enrichment.toml`, then
/// `ENRICHMENT_*` environment variables (`__` separates nested keys).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    /// Largest accepted upload, in bytes
    pub max_upload_bytes: usize,

    /// Upload processing timeout; 0 disables it
    pub request_timeout_secs: u64,

    /// Where scoped temp files go; system temp dir when unset
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,

    /// Tracing filter used when RUST_LOG is unset
    pub log_filter: String,

    #[serde(default)]
    pub excel: ExcelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcelConfig {
    /// Respond with the record array as a JSON string instead of an array
    pub double_encode_response: bool,

    /// Null `company name`/`url` cells fail validation instead of being dropped
    pub require_complete_rows: bool,

    /// Report missing columns and missing values with distinct messages
    pub split_validation_errors: bool,
}

impl Default for ExcelConfig {
    fn default() -> Self {
        Self {
            double_encode_response: true,
            require_complete_rows: true,
            split_validation_errors: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_bytes: 16 * 1024 * 1024,
            request_timeout_secs: 60,
            temp_dir: None,
            log_filter: "info".to_string(),
            excel: ExcelConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_figment(Self::figment())
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        figment
            .extract()
            .map_err(|e| AppError::Internal(format!("Failed to load configuration: {}", e)))
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
