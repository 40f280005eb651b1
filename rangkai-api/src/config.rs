/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct. The `.env` file is not read here; the
/// binary loads it into the process environment once at startup.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `APP_ENV`: `production` requires `DB_NAME` and `DB_USER` to be set explicitly
/// - `LOG_FORMAT`: `json` for JSON log lines, anything else for human-readable output
/// - `DB_*`: Database settings, see [`rangkai_shared::config`]
/// - `RUST_LOG`: Log level filter
///
/// # Example
///
/// ```no_run
/// use rangkai_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use anyhow::Context;
use rangkai_shared::config::{DbConfig, DbDefaults};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DbConfig,
}

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Deployment environment
    pub environment: AppEnv,

    /// Log output format
    pub log_format: LogFormat,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    /// Parses `APP_ENV`; anything other than "production" is development
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            AppEnv::Production
        } else {
            AppEnv::Development
        }
    }

    /// Database defaults for this environment
    pub fn db_defaults(self) -> DbDefaults {
        match self {
            AppEnv::Development => DbDefaults::development(),
            AppEnv::Production => DbDefaults::strict(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }

    /// Reads `LOG_FORMAT` directly, so logging can start before the rest of
    /// the configuration is loaded
    pub fn from_env() -> Self {
        Self::resolve(env_lookup)
    }

    fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("LOG_FORMAT")
            .map(|v| Self::parse(&v))
            .unwrap_or(LogFormat::Pretty)
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `API_PORT` is not a valid port number
    /// - Database configuration is missing or invalid
    pub fn from_env() -> anyhow::Result<Self> {
        Self::resolve(env_lookup)
    }

    /// Builds the configuration from an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn resolve<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = ApiConfig::resolve(&lookup)?;
        let database = DbConfig::resolve(&lookup, &api.environment.db_defaults())
            .context("Failed to load database configuration")?;

        Ok(Self { api, database })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

impl ApiConfig {
    /// Loads the server section from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::resolve(env_lookup)
    }

    fn resolve<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("API_PORT must be a valid port number")?;

        let environment = lookup("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        Ok(Self {
            host,
            port,
            environment,
            log_format: LogFormat::resolve(&lookup),
        })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}
