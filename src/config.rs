use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Port the HTTP listener binds when `SERVER_PORT` is not provided.
pub const DEFAULT_SERVER_PORT: u16 = 8081;
/// Upstream chat-completions endpoint consulted by the summary proxy.
pub const DEFAULT_SUMMARY_URL: &str = "http://localhost:11411/v1/chat/completions";
/// Model identifier sent with every summary request.
pub const DEFAULT_SUMMARY_MODEL: &str = "llama2";
/// Upper bound on a single outbound summary call.
pub const DEFAULT_SUMMARY_TIMEOUT: Duration = Duration::from_secs(30);
/// File the log layer appends to when `STUDENT_API_LOG_FILE` is not provided.
pub const DEFAULT_LOG_FILE: &str = "logs/student-api.log";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the student service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TCP port for the HTTP listener.
    pub server_port: u16,
    /// Full URL of the upstream text-generation endpoint.
    pub summary_url: String,
    /// Model identifier passed to the upstream service.
    pub summary_model: String,
    /// Timeout applied to the outbound summary call, body read included.
    pub summary_timeout: Duration,
    /// File that receives a copy of every log line.
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            summary_url: DEFAULT_SUMMARY_URL.to_string(),
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
            summary_timeout: DEFAULT_SUMMARY_TIMEOUT,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup, falling back to defaults.
    ///
    /// Blank values are treated the same as missing ones.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let server_port = optional("SERVER_PORT")
            .map(|value| {
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
            })
            .transpose()?
            .unwrap_or(DEFAULT_SERVER_PORT);

        let summary_timeout = optional("SUMMARY_TIMEOUT_SECS")
            .map(|value| match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(ConfigError::InvalidValue("SUMMARY_TIMEOUT_SECS".into())),
            })
            .transpose()?
            .unwrap_or(DEFAULT_SUMMARY_TIMEOUT);

        Ok(Self {
            server_port,
            summary_url: optional("SUMMARY_URL").unwrap_or_else(|| DEFAULT_SUMMARY_URL.into()),
            summary_model: optional("SUMMARY_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.into()),
            summary_timeout,
            log_file: optional("STUDENT_API_LOG_FILE")
                .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from),
        })
    }
}

/// Merge an optional `.env` file into the environment and build the configuration.
pub fn load() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    Config::from_env()
}
