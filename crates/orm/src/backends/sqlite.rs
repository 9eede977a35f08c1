//! SQLite Backend Implementation
//!
//! SQLite has no strict column types, so values are decoded by the storage
//! class of each cell. Columns declared `BOOLEAN` are the one exception and
//! come back as booleans.

use super::core::*;
use crate::error::{ModelError, ModelResult};
use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, Column, Pool, Row as SqlxRow, Sqlite};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// SQLite database backend implementation
#[derive(Debug)]
pub struct SqliteBackend;

impl SqliteBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SqliteBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseBackend for SqliteBackend {
    async fn create_pool(&self, database_url: &str, config: DatabasePoolConfig) -> ModelResult<Arc<dyn DatabasePool>> {
        let sqlx_pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .test_before_acquire(config.test_before_acquire)
            .idle_timeout(config.idle_timeout_seconds.map(Duration::from_secs))
            .max_lifetime(config.max_lifetime_seconds.map(Duration::from_secs))
            .connect(database_url)
            .await
            .map_err(|e| ModelError::Connection(format!("Failed to create SQLite pool: {}", e)))?;

        Ok(Arc::new(SqlitePool::new(Arc::new(sqlx_pool))))
    }

    fn sql_dialect(&self) -> SqlDialect {
        SqlDialect::SQLite
    }

    fn backend_type(&self) -> crate::backends::DatabaseBackendType {
        crate::backends::DatabaseBackendType::SQLite
    }

    fn validate_database_url(&self, url: &str) -> ModelResult<()> {
        if !url.starts_with("sqlite:") && !url.starts_with("file:") {
            return Err(ModelError::Connection("Invalid SQLite URL scheme".to_string()));
        }
        Ok(())
    }
}

/// SQLite connection pool implementation
pub struct SqlitePool {
    pool: Arc<Pool<Sqlite>>,
}

impl SqlitePool {
    pub fn new(pool: Arc<Pool<Sqlite>>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabasePool for SqlitePool {
    async fn begin_transaction(&self) -> ModelResult<Box<dyn DatabaseTransaction>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ModelError::Transaction(format!("Failed to begin transaction: {}", e)))?;
        debug!("sqlite transaction started");
        Ok(Box::new(SqliteTransaction { tx: Some(tx) }))
    }

    async fn execute(&self, sql: &str, params: &[DatabaseValue]) -> ModelResult<u64> {
        let result = bind_all(sqlx::query(sql), params)?.execute(&*self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn fetch_all(&self, sql: &str, params: &[DatabaseValue]) -> ModelResult<Vec<Box<dyn DatabaseRow>>> {
        let rows = bind_all(sqlx::query(sql), params)?.fetch_all(&*self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| Box::new(SqliteRow { row }) as Box<dyn DatabaseRow>)
            .collect())
    }

    async fn fetch_optional(&self, sql: &str, params: &[DatabaseValue]) -> ModelResult<Option<Box<dyn DatabaseRow>>> {
        let row = bind_all(sqlx::query(sql), params)?.fetch_optional(&*self.pool).await?;
        Ok(row.map(|row| Box::new(SqliteRow { row }) as Box<dyn DatabaseRow>))
    }

    fn dialect(&self) -> SqlDialect {
        SqlDialect::SQLite
    }

    async fn close(&self) -> ModelResult<()> {
        self.pool.close().await;
        Ok(())
    }

    fn stats(&self) -> DatabasePoolStats {
        let total = self.pool.size();
        let idle = self.pool.num_idle() as u32;
        DatabasePoolStats {
            total_connections: total,
            idle_connections: idle,
            active_connections: total.saturating_sub(idle),
        }
    }

    async fn health_check(&self) -> ModelResult<Duration> {
        let start = std::time::Instant::now();
        sqlx::query("SELECT 1")
            .execute(&*self.pool)
            .await
            .map_err(|e| ModelError::Connection(format!("Health check failed: {}", e)))?;
        Ok(start.elapsed())
    }
}

/// SQLite transaction implementation
pub struct SqliteTransaction {
    tx: Option<sqlx::Transaction<'static, Sqlite>>,
}

impl SqliteTransaction {
    fn active(&mut self) -> ModelResult<&mut sqlx::Transaction<'static, Sqlite>> {
        self.tx
            .as_mut()
            .ok_or_else(|| ModelError::Transaction("Transaction already completed".to_string()))
    }
}

#[async_trait]
impl DatabaseTransaction for SqliteTransaction {
    async fn execute(&mut self, sql: &str, params: &[DatabaseValue]) -> ModelResult<u64> {
        let tx = self.active()?;
        let result = bind_all(sqlx::query(sql), params)?.execute(&mut **tx).await?;
        Ok(result.rows_affected())
    }

    async fn fetch_all(&mut self, sql: &str, params: &[DatabaseValue]) -> ModelResult<Vec<Box<dyn DatabaseRow>>> {
        let tx = self.active()?;
        let rows = bind_all(sqlx::query(sql), params)?.fetch_all(&mut **tx).await?;
        Ok(rows
            .into_iter()
            .map(|row| Box::new(SqliteRow { row }) as Box<dyn DatabaseRow>)
            .collect())
    }

    async fn fetch_optional(&mut self, sql: &str, params: &[DatabaseValue]) -> ModelResult<Option<Box<dyn DatabaseRow>>> {
        let tx = self.active()?;
        let row = bind_all(sqlx::query(sql), params)?.fetch_optional(&mut **tx).await?;
        Ok(row.map(|row| Box::new(SqliteRow { row }) as Box<dyn DatabaseRow>))
    }

    fn dialect(&self) -> SqlDialect {
        SqlDialect::SQLite
    }

    async fn commit(mut self: Box<Self>) -> ModelResult<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| ModelError::Transaction("Transaction already completed".to_string()))?;
        tx.commit()
            .await
            .map_err(|e| ModelError::Transaction(format!("Transaction commit failed: {}", e)))
    }

    async fn rollback(mut self: Box<Self>) -> ModelResult<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| ModelError::Transaction("Transaction already completed".to_string()))?;
        tx.rollback()
            .await
            .map_err(|e| ModelError::Transaction(format!("Transaction rollback failed: {}", e)))
    }
}

/// SQLite row implementation
pub struct SqliteRow {
    row: sqlx::sqlite::SqliteRow,
}

impl DatabaseRow for SqliteRow {
    fn get_by_index(&self, index: usize) -> ModelResult<DatabaseValue> {
        sqlite_value_to_database_value(&self.row, index)
    }

    fn get_by_name(&self, name: &str) -> ModelResult<DatabaseValue> {
        let index = self
            .row
            .columns()
            .iter()
            .position(|col| col.name() == name)
            .ok_or_else(|| ModelError::Query(format!("Column '{}' not found", name)))?;
        sqlite_value_to_database_value(&self.row, index)
    }

    fn column_count(&self) -> usize {
        self.row.len()
    }

    fn column_names(&self) -> Vec<String> {
        self.row.columns().iter().map(|col| col.name().to_string()).collect()
    }
}

type SqliteQuery<'a> = sqlx::query::Query<'a, Sqlite, sqlx::sqlite::SqliteArguments<'a>>;

fn bind_all<'a>(mut query: SqliteQuery<'a>, params: &[DatabaseValue]) -> ModelResult<SqliteQuery<'a>> {
    for param in params {
        query = bind_database_value(query, param)?;
    }
    Ok(query)
}

/// Bind a DatabaseValue to a sqlx query. JSON documents are stored as text.
fn bind_database_value<'a>(query: SqliteQuery<'a>, value: &DatabaseValue) -> ModelResult<SqliteQuery<'a>> {
    match value {
        DatabaseValue::Null => Ok(query.bind(Option::<String>::None)),
        DatabaseValue::Bool(b) => Ok(query.bind(*b)),
        DatabaseValue::Int32(i) => Ok(query.bind(*i)),
        DatabaseValue::Int64(i) => Ok(query.bind(*i)),
        DatabaseValue::Float32(f) => Ok(query.bind(*f)),
        DatabaseValue::Float64(f) => Ok(query.bind(*f)),
        DatabaseValue::String(s) => Ok(query.bind(s.clone())),
        DatabaseValue::Bytes(b) => Ok(query.bind(b.clone())),
        DatabaseValue::Uuid(u) => Ok(query.bind(u.to_string())),
        DatabaseValue::DateTime(dt) => Ok(query.bind(*dt)),
        DatabaseValue::Date(d) => Ok(query.bind(*d)),
        DatabaseValue::Time(t) => Ok(query.bind(*t)),
        DatabaseValue::Json(j) => Ok(query.bind(j.to_string())),
        DatabaseValue::Array(_) => Err(ModelError::Query(
            "Array values must be expanded before binding".to_string(),
        )),
    }
}

/// Convert a SQLite cell to DatabaseValue
fn sqlite_value_to_database_value(row: &sqlx::sqlite::SqliteRow, index: usize) -> ModelResult<DatabaseValue> {
    use sqlx::{TypeInfo, ValueRef};

    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(DatabaseValue::Null);
    }
    let storage = raw.type_info().name().to_string();
    let declared = row.columns()[index].type_info().name().to_uppercase();

    if declared == "BOOLEAN" || declared == "BOOL" {
        let value: i64 = row.try_get(index)?;
        return Ok(DatabaseValue::Bool(value != 0));
    }

    let value = match storage.as_str() {
        "INTEGER" | "BOOLEAN" => DatabaseValue::Int64(row.try_get(index)?),
        "REAL" => DatabaseValue::Float64(row.try_get(index)?),
        "BLOB" => DatabaseValue::Bytes(row.try_get(index)?),
        _ => DatabaseValue::String(row.try_get(index)?),
    };
    Ok(value)
}
