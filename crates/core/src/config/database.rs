use crate::config::{ConfigError, ConfigSource, ConfigTrait, ConfigValidator, DatabaseUrlValidator, RangeValidator};
use std::collections::HashMap;
use std::env;

/// Connection settings for the relational store
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection
    pub acquire_timeout: u64,
    /// Seconds a connection may stay idle, `None` keeps it forever
    pub idle_timeout: Option<u64>,
    /// Seconds before a connection is recycled, `None` keeps it forever
    pub max_lifetime: Option<u64>,
    pub test_before_acquire: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: 30,
            idle_timeout: Some(600),
            max_lifetime: Some(1800),
            test_before_acquire: true,
        }
    }

    /// Single-connection in-memory SQLite store. The connection is never
    /// recycled because the database lives only as long as it does.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 5,
            idle_timeout: None,
            max_lifetime: None,
            test_before_acquire: false,
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, field: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::invalid_value(field, raw, expected)),
        Err(_) => Ok(None),
    }
}

impl ConfigTrait for DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("GEMS_DATABASE_URL").map_err(|_| {
            ConfigError::missing_required(
                "database_url",
                "GEMS_DATABASE_URL environment variable is required",
            )
        })?;
        let mut config = Self::new(url);

        if let Some(max) = parse_env("GEMS_DB_MAX_CONNECTIONS", "max_connections", "positive integer")? {
            config.max_connections = max;
        }
        if let Some(min) = parse_env("GEMS_DB_MIN_CONNECTIONS", "min_connections", "positive integer")? {
            config.min_connections = min;
        }
        if let Some(timeout) = parse_env("GEMS_DB_ACQUIRE_TIMEOUT", "acquire_timeout", "seconds")? {
            config.acquire_timeout = timeout;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        DatabaseUrlValidator::default().validate(&self.url)?;
        RangeValidator { field: "max_connections", min: 1, max: 1000 }
            .validate(&(self.max_connections as u64))?;
        RangeValidator { field: "acquire_timeout", min: 1, max: 3600 }.validate(&self.acquire_timeout)?;

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation_failed(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert("url".to_string(), ConfigSource::of_env("GEMS_DATABASE_URL", "required"));
        sources.insert(
            "max_connections".to_string(),
            ConfigSource::of_env("GEMS_DB_MAX_CONNECTIONS", "10"),
        );
        sources.insert(
            "min_connections".to_string(),
            ConfigSource::of_env("GEMS_DB_MIN_CONNECTIONS", "1"),
        );
        sources.insert(
            "acquire_timeout".to_string(),
            ConfigSource::of_env("GEMS_DB_ACQUIRE_TIMEOUT", "30"),
        );
        sources
    }
}
