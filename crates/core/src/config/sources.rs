/// Where a configuration value came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Value loaded from environment variable
    EnvVar(String),
    /// Default value used
    Default(String),
    /// Value provided programmatically
    Programmatic,
}

impl ConfigSource {
    /// Check if source is environment variable
    pub fn is_env_var(&self) -> bool {
        matches!(self, ConfigSource::EnvVar(_))
    }

    /// Check if source is default value
    pub fn is_default(&self) -> bool {
        matches!(self, ConfigSource::Default(_))
    }

    /// Source of `key`, given its default description
    pub fn of_env(key: &str, default: &str) -> Self {
        if std::env::var(key).is_ok() {
            ConfigSource::EnvVar(key.to_string())
        } else {
            ConfigSource::Default(default.to_string())
        }
    }
}
