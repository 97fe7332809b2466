use lingo_core::session::HistoryMode;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: String,
    pub api_base: String,
    pub assistant_id: Option<String>,
    pub thread_id: Option<String>,
    pub model: String,
    pub poll_interval: Duration,
    pub history_mode: HistoryMode,
    pub log_level: Level,
}

/// Reads an optional variable, treating an empty value as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let openai_api_key = optional_var("OPENAI_API_KEY")
            .ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))?;

        let api_base = optional_var("OPENAI_API_BASE")
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());

        let assistant_id = optional_var("OPENAI_ASSISTANT_KEY");
        let thread_id = optional_var("OPENAI_THREAD_KEY");

        let model = optional_var("ASSISTANT_MODEL").unwrap_or_else(|| "gpt-4".to_string());

        let poll_interval = match optional_var("RUN_POLL_INTERVAL_MS") {
            Some(raw) => raw.parse::<u64>().map(Duration::from_millis).map_err(|e| {
                ConfigError::InvalidValue("RUN_POLL_INTERVAL_MS".to_string(), e.to_string())
            })?,
            None => Duration::from_millis(1000),
        };

        let history_mode = match optional_var("HISTORY_MODE").as_deref() {
            None => HistoryMode::default(),
            Some(raw) => match raw.to_lowercase().as_str() {
                "transcript" => HistoryMode::Transcript,
                "latest" => HistoryMode::Latest,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "HISTORY_MODE".to_string(),
                        format!("'{}' is not one of 'transcript', 'latest'", raw),
                    ));
                }
            },
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            openai_api_key,
            api_base,
            assistant_id,
            thread_id,
            model,
            poll_interval,
            history_mode,
            log_level,
        })
    }
}
