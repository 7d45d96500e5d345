use std::path::PathBuf;
use std::str::FromStr;

use swiftreg_core::bulk_loader::DEFAULT_BATCH_SIZE;

#[derive(Debug, thiserror::Error)]
#[error("{var} has an invalid value: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. Without one the registry runs on the in-memory store.
    pub database_url: Option<String>,
    /// CSV file loaded at startup into an empty store.
    pub import_file: Option<PathBuf>,
    /// Rows per flush during the startup load.
    pub import_batch_size: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `8080`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `DATABASE_URL`            | unset (in-memory store) |
    /// | `SWIFT_IMPORT_FILE`       | unset (no import)       |
    /// | `SWIFT_IMPORT_BATCH_SIZE` | `200`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", var("PORT"), 8080)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 30)?;
        let import_batch_size = parse_or(
            "SWIFT_IMPORT_BATCH_SIZE",
            var("SWIFT_IMPORT_BATCH_SIZE"),
            DEFAULT_BATCH_SIZE,
        )?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url: var("DATABASE_URL"),
            import_file: var("SWIFT_IMPORT_FILE").map(PathBuf::from),
            import_batch_size,
        })
    }
}

fn parse_or<T: FromStr>(
    var: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError { var, value }),
    }
}
