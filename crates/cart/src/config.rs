//! Cart engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional, with development defaults matching the local json-server
//! setup:
//! - `ROCKETSHOES_API_BASE_URL` - Base URL of the catalog/stock REST API
//!   (default: `http://localhost:3333/`)
//! - `ROCKETSHOES_API_TIMEOUT_SECS` - Per-request timeout in seconds
//!   (default: 10)
//! - `ROCKETSHOES_STORAGE_DIR` - Directory for the persisted cart blob
//!   (default: `.rocketshoes`)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Base URL env var name.
pub const ENV_API_BASE_URL: &str = "ROCKETSHOES_API_BASE_URL";
/// Request timeout env var name.
pub const ENV_API_TIMEOUT_SECS: &str = "ROCKETSHOES_API_TIMEOUT_SECS";
/// Storage directory env var name.
pub const ENV_STORAGE_DIR: &str = "ROCKETSHOES_STORAGE_DIR";

const DEFAULT_API_BASE_URL: &str = "http://localhost:3333/";
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STORAGE_DIR: &str = ".rocketshoes";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set to a value that cannot be parsed.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog/stock API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST API. Always ends with a `/` so that relative
    /// paths join below it instead of replacing the last segment.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Cart engine configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog/stock API settings.
    pub api: ApiConfig,
    /// Directory the persisted cart blob lives in.
    pub storage_dir: PathBuf,
}

impl CartConfig {
    /// Load configuration from environment variables, falling back to the
    /// development defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_base_url =
            env::var(ENV_API_BASE_URL).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        let base_url = parse_base_url(&raw_base_url)?;

        let timeout = match env::var(ENV_API_TIMEOUT_SECS) {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar(
                        ENV_API_TIMEOUT_SECS.to_owned(),
                        format!("expected an integer number of seconds, got {raw:?}"),
                    )
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        };

        let storage_dir = env::var(ENV_STORAGE_DIR)
            .map_or_else(|_| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        Ok(Self {
            api: ApiConfig { base_url, timeout },
            storage_dir,
        })
    }
}

/// Parse and normalize the API base URL.
///
/// `Url::join` treats the last path segment as a file unless the path ends
/// with `/`, so the trailing slash is enforced here once instead of at
/// every call site.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw)
        .map_err(|err| ConfigError::InvalidEnvVar(ENV_API_BASE_URL.to_owned(), err.to_string()))?;

    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }

    Ok(url)
}
