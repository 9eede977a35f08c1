//! Error types for the model layer
//!
//! Store-level failures are classified here so that callers can tell a
//! missing row or a constraint violation from a broken connection.

use std::fmt;

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error types for model operations
#[derive(Debug, Clone)]
pub enum ModelError {
    /// No row matched a single-object read
    NotFound(String),
    /// Unique or foreign key constraint rejected the statement; carries the
    /// store's message unchanged
    ConstraintViolation(String),
    /// A lifecycle hook failed and the surrounding transaction was rolled back
    Hook {
        kind: String,
        phase: String,
        message: String,
    },
    /// No relation is registered between the two kinds
    RelationNotRegistered(String, String),
    /// Database driver error
    Database(String),
    /// Connection pool error
    Connection(String),
    /// Transaction error
    Transaction(String),
    /// Query building error
    Query(String),
    /// Invalid input, such as an unscoped update
    Validation(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// Configuration error
    Configuration(String),
    /// The caller's context was cancelled
    Cancelled,
    /// The caller's deadline passed
    Timeout,
}

impl ModelError {
    pub fn hook(kind: impl Into<String>, phase: impl fmt::Display, message: impl fmt::Display) -> Self {
        ModelError::Hook {
            kind: kind.into(),
            phase: phase.to_string(),
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound(_))
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, ModelError::ConstraintViolation(_))
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NotFound(table) => write!(f, "Record not found in table '{}'", table),
            ModelError::ConstraintViolation(msg) => write!(f, "Constraint violation: {}", msg),
            ModelError::Hook { kind, phase, message } => {
                write!(f, "Hook {} for '{}' failed: {}", phase, kind, message)
            }
            ModelError::RelationNotRegistered(a, b) => {
                write!(f, "No relation registered between '{}' and '{}'", a, b)
            }
            ModelError::Database(msg) => write!(f, "Database error: {}", msg),
            ModelError::Connection(msg) => write!(f, "Connection error: {}", msg),
            ModelError::Transaction(msg) => write!(f, "Transaction error: {}", msg),
            ModelError::Query(msg) => write!(f, "Query error: {}", msg),
            ModelError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ModelError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            ModelError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ModelError::Cancelled => write!(f, "Operation cancelled"),
            ModelError::Timeout => write!(f, "Operation deadline exceeded"),
        }
    }
}

impl std::error::Error for ModelError {}

// Convert from sqlx errors
impl From<sqlx::Error> for ModelError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db)
                if db.is_unique_violation() || db.is_foreign_key_violation() =>
            {
                ModelError::ConstraintViolation(db.message().to_string())
            }
            sqlx::Error::RowNotFound => ModelError::NotFound(String::new()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                ModelError::Connection(err.to_string())
            }
            _ => ModelError::Database(err.to_string()),
        }
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

impl From<gems_core::ConfigError> for ModelError {
    fn from(err: gems_core::ConfigError) -> Self {
        ModelError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_error_display() {
        let err = ModelError::hook("tenant", "BeforeDelete", "sync failed");
        assert_eq!(err.to_string(), "Hook BeforeDelete for 'tenant' failed: sync failed");
    }

    #[test]
    fn test_relation_not_registered_display() {
        let err = ModelError::RelationNotRegistered("project".into(), "user".into());
        assert!(err.to_string().contains("'project' and 'user'"));
    }

    #[test]
    fn test_sqlx_pool_timeout_maps_to_connection() {
        let err: ModelError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, ModelError::Connection(_)));
    }
}
