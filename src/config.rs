//! Runtime configuration.
//!
//! Values come from the process environment (after loading `.env` via
//! `dotenvy`) and may be overridden by CLI flags. The API key is optional at
//! load time: a missing key only surfaces as a `FetchError` when a request is
//! attempted, so the dashboard can still start and show the problem.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/fred";
pub const DEFAULT_LIMIT: usize = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE: &str = "econ-dash.log";

pub const ENV_API_KEY: &str = "FRED_API_KEY";
pub const ENV_BASE_URL: &str = "FRED_BASE_URL";
pub const ENV_LIMIT: &str = "ECON_DASH_LIMIT";
pub const ENV_TIMEOUT: &str = "ECON_DASH_TIMEOUT_SECS";
pub const ENV_LOG_FILE: &str = "ECON_DASH_LOG";

#[derive(Debug, Clone)]
pub struct DashConfig {
    pub api_key: Option<String>,
    /// FRED API root, without the `/series/observations` suffix.
    pub base_url: String,
    /// Observations requested per chart fetch.
    pub limit: usize,
    pub timeout: Duration,
    /// Where the TUI writes its log (the terminal is busy drawing).
    pub log_file: PathBuf,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: std::env::temp_dir().join(DEFAULT_LOG_FILE),
        }
    }
}

impl DashConfig {
    /// Load from `.env` + process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        config.api_key = lookup(ENV_API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup(ENV_LIMIT) {
            config.limit = parse_positive(ENV_LIMIT, &raw)?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs = parse_positive(ENV_TIMEOUT, &raw)?;
            config.timeout = Duration::from_secs(secs as u64);
        }

        if let Some(path) = lookup(ENV_LOG_FILE).filter(|p| !p.trim().is_empty()) {
            config.log_file = PathBuf::from(path.trim());
        }

        Ok(config)
    }

    /// `{base_url}/series/observations`
    pub fn observations_url(&self) -> String {
        format!("{}/series/observations", self.base_url)
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<usize, AppError> {
    match raw.trim().parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(AppError::config(format!(
            "Invalid {name}='{raw}': expected a positive integer."
        ))),
    }
}
