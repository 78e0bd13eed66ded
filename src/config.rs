//! Configuration management for the Mailjet adapter.
//!
//! Configuration is loaded from environment variables. A `.env` file is read
//! first if present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::fmt;

/// Default Mailjet API host.
pub const DEFAULT_API_URL: &str = "https://api.mailjet.com";

/// Default Mailjet REST API version.
pub const DEFAULT_API_VERSION: &str = "v3";

/// Configuration for the Mailjet client.
#[derive(Clone)]
pub struct Config {
    /// Mailjet public API key
    pub api_key: String,

    /// Mailjet private API key
    pub api_secret: String,

    /// When false, write requests are not sent (default: false)
    pub live_mode: bool,

    /// REST API version segment (default: "v3")
    pub api_version: String,

    /// API host (default: https://api.mailjet.com)
    pub api_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `MAILJET_API_KEY`: public API key
    /// - `MAILJET_API_SECRET`: private API key
    ///
    /// Optional environment variables:
    /// - `MAILJET_LIVE_MODE`: send write requests (default: false)
    /// - `MAILJET_API_VERSION`: API version (default: "v3")
    /// - `MAILJET_API_URL`: API host (default: https://api.mailjet.com)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let api_key = Self::required_var("MAILJET_API_KEY")?;
        let api_secret = Self::required_var("MAILJET_API_SECRET")?;

        let api_url = env::var("MAILJET_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "MAILJET_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let api_version =
            env::var("MAILJET_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());
        if api_version.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "MAILJET_API_VERSION".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let live_mode = Self::parse_env_bool("MAILJET_LIVE_MODE", false)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_key,
            api_secret,
            live_mode,
            api_version,
            api_url,
            request_timeout,
            log_level,
        })
    }

    /// Read a required, non-blank environment variable.
    fn required_var(var_name: &str) -> ConfigResult<String> {
        let value =
            env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))?;

        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        Ok(value)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as bool with a default value.
    ///
    /// Accepts `true`/`false`, `1`/`0`, `yes`/`no` (case-insensitive).
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" | "" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("live_mode", &self.live_mode)
            .field("api_version", &self.api_version)
            .field("api_url", &self.api_url)
            .field("request_timeout", &self.request_timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            api_secret: String::new(),
            live_mode: false,
            api_version: DEFAULT_API_VERSION.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}
