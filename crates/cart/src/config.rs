//! Cart configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Key the cart blob is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

const DEFAULT_STORAGE_DIR: &str = "./.cart";
const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
const DEFAULT_API_TIMEOUT_MS: u64 = 5000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Cart configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `CART_STORAGE_KEY` — persistence key (default: `"@RocketShoes:cart"`)
/// - `CART_STORAGE_DIR` — directory for file persistence (default: `"./.cart"`)
/// - `CART_API_BASE_URL` — product API root (default: `"http://localhost:3333"`)
/// - `CART_API_TIMEOUT_MS` — per-request timeout (default: `5000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    pub storage_key: String,
    pub storage_dir: PathBuf,
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub log_level: String,
}

impl CartConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            storage_key: lookup("CART_STORAGE_KEY")
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            storage_dir: lookup("CART_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR)),
            api_base_url: lookup("CART_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            api_timeout: Duration::from_millis(
                lookup("CART_API_TIMEOUT_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_API_TIMEOUT_MS),
            ),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
