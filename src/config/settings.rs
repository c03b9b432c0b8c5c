//! Process settings read from the environment at startup.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct Settings {
    /// REST root of the backend, without trailing slash.
    pub backend_url: String,
    pub api_key: String,
    pub bind_addr: SocketAddr,
    pub rules_path: Option<PathBuf>,
    pub backend_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("backend_url", &self.backend_url)
            .field("api_key", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("rules_path", &self.rules_path)
            .field("backend_timeout", &self.backend_timeout)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (tests pass a map instead of the process env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| get(key).ok_or_else(|| ConfigError::Load(format!("{} is not set", key)));

        let backend_url = required("BACKEND_URL")?.trim_end_matches('/').to_string();
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(ConfigError::Load(format!(
                "BACKEND_URL must start with http:// or https://, got '{}'",
                backend_url
            )));
        }
        let api_key = required("BACKEND_API_KEY")?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Load(format!("BIND_ADDR: {}", e)))?;
        let timeout_secs: u64 = match get("BACKEND_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::Load(format!("BACKEND_TIMEOUT_SECS must be a whole number of seconds, got '{}'", v)))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let body_limit_bytes: usize = match get("BODY_LIMIT_BYTES") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::Load(format!("BODY_LIMIT_BYTES must be a byte count, got '{}'", v)))?,
            None => DEFAULT_BODY_LIMIT_BYTES,
        };

        Ok(Settings {
            backend_url,
            api_key,
            bind_addr,
            rules_path: get("RULES_PATH").map(PathBuf::from),
            backend_timeout: Duration::from_secs(timeout_secs),
            body_limit_bytes,
        })
    }
}
