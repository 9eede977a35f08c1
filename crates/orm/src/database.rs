//! Database connectivity
//!
//! Opens a pool for the configured URL through the backend registry and
//! reports its health.

use crate::backends::{DatabaseBackendRegistry, DatabasePool, DatabasePoolConfig, DatabasePoolStats};
use crate::error::{ModelError, ModelResult};
use gems_core::{ConfigTrait, DatabaseConfig};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Snapshot taken by [`health_report`]
#[derive(Debug, Clone)]
pub struct PoolHealthReport {
    pub check_duration: Duration,
    pub total_check_time: Duration,
    pub pool_size: u32,
    pub idle_connections: u32,
    pub active_connections: u32,
}

/// Validate `config` and open a pool for its URL
pub async fn connect(config: &DatabaseConfig) -> ModelResult<Arc<dyn DatabasePool>> {
    config.validate()?;

    let registry = DatabaseBackendRegistry::with_defaults();
    let pool_config = DatabasePoolConfig::from(config);
    let pool = registry.create_pool(&config.url, pool_config).await?;

    tracing::info!(
        backend = ?pool.dialect(),
        max_connections = config.max_connections,
        "database pool opened"
    );
    Ok(pool)
}

/// Open a pool from `GEMS_DATABASE_URL` and related variables
pub async fn connect_from_env() -> ModelResult<Arc<dyn DatabasePool>> {
    let config = DatabaseConfig::from_env()?;
    connect(&config).await
}

/// Run a health check and combine it with pool statistics
pub async fn health_report(pool: &dyn DatabasePool) -> ModelResult<PoolHealthReport> {
    let start = Instant::now();
    let check_duration = pool.health_check().await.map_err(|e| {
        ModelError::Connection(format!("Health check failed: {}", e))
    })?;
    let DatabasePoolStats {
        total_connections,
        idle_connections,
        active_connections,
    } = pool.stats();

    let report = PoolHealthReport {
        check_duration,
        total_check_time: start.elapsed(),
        pool_size: total_connections,
        idle_connections,
        active_connections,
    };
    tracing::debug!("Database pool health report: {:?}", report);
    Ok(report)
}
