pub mod database;
pub mod logging;
pub mod sources;
pub mod validation;

pub use database::*;
pub use logging::*;
pub use sources::*;
pub use validation::*;

use std::collections::HashMap;

/// Configuration loaded from the process environment
pub trait ConfigTrait: Sized {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;

    /// Get configuration source information for debugging
    fn config_sources(&self) -> HashMap<String, ConfigSource>;
}
