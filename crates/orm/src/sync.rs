//! Kubernetes-sync collaborator
//!
//! Hooks push the state of stored entities into custom resources through this
//! interface. The resource logic itself lives outside this crate; a failing
//! call aborts the mutation that triggered the hook.

use crate::error::ModelResult;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[async_trait]
pub trait KubeSync: Send + Sync {
    /// Create the resource `kind/key` or replace its spec
    async fn create_or_update(&self, kind: &str, key: &str, spec: JsonValue) -> ModelResult<()>;

    async fn delete(&self, kind: &str, key: &str) -> ModelResult<()>;

    async fn get(&self, kind: &str, key: &str) -> ModelResult<Option<JsonValue>>;
}

/// In-process resource store, keyed by `(kind, key)`
#[derive(Debug, Default)]
pub struct MemorySync {
    resources: Mutex<BTreeMap<(String, String), JsonValue>>,
}

impl MemorySync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.resources.lock().map(|r| r.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with<R>(&self, f: impl FnOnce(&mut BTreeMap<(String, String), JsonValue>) -> R) -> ModelResult<R> {
        let mut guard = self
            .resources
            .lock()
            .map_err(|_| crate::error::ModelError::Database("resource store lock poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl KubeSync for MemorySync {
    async fn create_or_update(&self, kind: &str, key: &str, spec: JsonValue) -> ModelResult<()> {
        tracing::debug!(kind, key, "resource applied");
        self.with(|r| {
            r.insert((kind.to_string(), key.to_string()), spec);
        })
    }

    async fn delete(&self, kind: &str, key: &str) -> ModelResult<()> {
        tracing::debug!(kind, key, "resource deleted");
        self.with(|r| {
            r.remove(&(kind.to_string(), key.to_string()));
        })
    }

    async fn get(&self, kind: &str, key: &str) -> ModelResult<Option<JsonValue>> {
        self.with(|r| r.get(&(kind.to_string(), key.to_string())).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_sync_apply_and_delete() {
        let sync = MemorySync::new();
        sync.create_or_update("tenant", "alpha", json!({"admin": ["bob"]}))
            .await
            .unwrap();
        sync.create_or_update("tenant", "alpha", json!({"admin": ["bob", "eve"]}))
            .await
            .unwrap();
        assert_eq!(sync.len(), 1);
        assert_eq!(
            sync.get("tenant", "alpha").await.unwrap(),
            Some(json!({"admin": ["bob", "eve"]}))
        );

        sync.delete("tenant", "alpha").await.unwrap();
        assert!(sync.get("tenant", "alpha").await.unwrap().is_none());
        assert!(sync.is_empty());
    }
}
