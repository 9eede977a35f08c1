//! Foundation shared by the gems model layer and its code generator:
//! environment-driven configuration, logging setup, and the naming
//! conventions that map type names onto tables and columns.

pub mod config;
pub mod errors;
pub mod logging;
pub mod naming;

pub use config::{ConfigError, ConfigSource, ConfigTrait, DatabaseConfig, LogFormat, LoggingConfig};
pub use errors::{CoreError, CoreResult};
pub use logging::init_logging;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
