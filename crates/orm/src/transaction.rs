//! Transaction completion
//!
//! Mutations that run hooks share one transaction. It is committed when the
//! whole sequence succeeded and rolled back otherwise; the rollback has
//! finished by the time the original error reaches the caller.

use crate::backends::{DatabasePool, DatabaseTransaction};
use crate::error::ModelResult;
use tracing::{debug, warn};

/// Begin a transaction on `pool`
pub async fn begin(pool: &dyn DatabasePool) -> ModelResult<Box<dyn DatabaseTransaction>> {
    pool.begin_transaction().await
}

/// Commit `tx` if `result` is `Ok`, roll it back otherwise
pub async fn finish<R>(tx: Box<dyn DatabaseTransaction>, result: ModelResult<R>) -> ModelResult<R> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            debug!("transaction committed");
            Ok(value)
        }
        Err(err) => {
            match tx.rollback().await {
                Ok(()) => debug!(error = %err, "transaction rolled back"),
                Err(rollback_err) => {
                    warn!(error = %err, rollback_error = %rollback_err, "rollback failed")
                }
            }
            Err(err)
        }
    }
}
