use crate::config::{ConfigError, ConfigSource, ConfigTrait};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(LogFormat::Plain),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::invalid_value("log_format", s, "plain, pretty, or json")),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Explicit `EnvFilter` directive, overrides `level` when set
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Plain,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }
}

const VALID_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl ConfigTrait for LoggingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(level) = env::var("GEMS_LOG_LEVEL") {
            config.level = level;
        }
        if let Ok(format) = env::var("GEMS_LOG_FORMAT") {
            config.format = format.parse()?;
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LEVELS.contains(&self.level.as_str()) {
            return Err(ConfigError::invalid_value(
                "log_level",
                self.level.clone(),
                format!("one of: {}", VALID_LEVELS.join(", ")),
            ));
        }
        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert("level".to_string(), ConfigSource::of_env("GEMS_LOG_LEVEL", "info"));
        sources.insert("format".to_string(), ConfigSource::of_env("GEMS_LOG_FORMAT", "plain"));
        sources
    }
}
