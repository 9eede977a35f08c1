use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired { field: String, hint: String },

    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Configuration validation failed: {message}")]
    ValidationFailed { message: String },
}

impl ConfigError {
    /// Create a missing required field error
    pub fn missing_required(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingRequired {
            field: field.into(),
            hint: hint.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a validation failed error
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

/// Trait for validating configuration values
pub trait ConfigValidator<T> {
    fn validate(&self, value: &T) -> Result<(), ConfigError>;
}

/// Database URL validator: accepts only the schemes a store backend exists for
pub struct DatabaseUrlValidator {
    pub schemes: Vec<String>,
}

impl Default for DatabaseUrlValidator {
    fn default() -> Self {
        Self {
            schemes: vec![
                "postgres".to_string(),
                "postgresql".to_string(),
                "sqlite".to_string(),
            ],
        }
    }
}

impl ConfigValidator<String> for DatabaseUrlValidator {
    fn validate(&self, value: &String) -> Result<(), ConfigError> {
        if value.is_empty() {
            return Err(ConfigError::invalid_value("database_url", value.clone(), "non-empty URL"));
        }

        let has_valid_scheme = self
            .schemes
            .iter()
            .any(|scheme| value.starts_with(&format!("{}:", scheme)));

        if !has_valid_scheme {
            return Err(ConfigError::invalid_value(
                "database_url",
                value.clone(),
                format!("URL with scheme: {}", self.schemes.join(", ")),
            ));
        }

        Ok(())
    }
}

/// Numeric range validator
pub struct RangeValidator {
    pub field: &'static str,
    pub min: u64,
    pub max: u64,
}

impl ConfigValidator<u64> for RangeValidator {
    fn validate(&self, value: &u64) -> Result<(), ConfigError> {
        if *value < self.min || *value > self.max {
            return Err(ConfigError::invalid_value(
                self.field,
                value.to_string(),
                format!("value between {} and {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_validator() {
        let validator = DatabaseUrlValidator::default();
        assert!(validator.validate(&"postgres://localhost/gems".to_string()).is_ok());
        assert!(validator.validate(&"sqlite::memory:".to_string()).is_ok());
        assert!(validator.validate(&"mysql://localhost/gems".to_string()).is_err());
        assert!(validator.validate(&String::new()).is_err());
    }

    #[test]
    fn test_range_validator() {
        let validator = RangeValidator { field: "max_connections", min: 1, max: 100 };
        assert!(validator.validate(&10).is_ok());
        assert!(validator.validate(&0).is_err());
        assert!(validator.validate(&101).is_err());
    }
}
