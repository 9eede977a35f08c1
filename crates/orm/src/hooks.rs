//! Lifecycle hooks
//!
//! Hooks are registered per `(kind, phase)` and run in registration order
//! inside the transaction of the mutation that triggers them. A failing
//! hook aborts the chain and the transaction.

use crate::backends::DatabaseTransaction;
use crate::error::{ModelError, ModelResult};
use crate::object::{AnyObject, Object};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    BeforeCreate,
    AfterCreate,
    BeforeUpdate,
    AfterUpdate,
    BeforeDelete,
    AfterDelete,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookPhase::BeforeCreate => "BeforeCreate",
            HookPhase::AfterCreate => "AfterCreate",
            HookPhase::BeforeUpdate => "BeforeUpdate",
            HookPhase::AfterUpdate => "AfterUpdate",
            HookPhase::BeforeDelete => "BeforeDelete",
            HookPhase::AfterDelete => "AfterDelete",
        };
        f.write_str(name)
    }
}

/// Callback run around a mutation
#[async_trait]
pub trait Hook: Send + Sync {
    async fn call(&self, tx: &mut dyn DatabaseTransaction, obj: &dyn AnyObject) -> ModelResult<()>;
}

/// Hook over a concrete object type; wrap with [`typed`] to register it
#[async_trait]
pub trait TypedHook<T: Object>: Send + Sync {
    async fn call(&self, tx: &mut dyn DatabaseTransaction, obj: &T) -> ModelResult<()>;
}

struct Typed<T, H> {
    hook: H,
    _marker: PhantomData<fn() -> T>,
}

#[async_trait]
impl<T, H> Hook for Typed<T, H>
where
    T: Object,
    H: TypedHook<T>,
{
    async fn call(&self, tx: &mut dyn DatabaseTransaction, obj: &dyn AnyObject) -> ModelResult<()> {
        let typed = obj.downcast_ref::<T>().ok_or_else(|| {
            ModelError::Validation(format!(
                "hook for '{}' received an object of kind '{}'",
                T::META.kind,
                obj.kind()
            ))
        })?;
        self.hook.call(tx, typed).await
    }
}

/// Adapt a [`TypedHook`] to the type-erased [`Hook`] interface
pub fn typed<T, H>(hook: H) -> Arc<dyn Hook>
where
    T: Object,
    H: TypedHook<T> + 'static,
{
    Arc::new(Typed {
        hook,
        _marker: PhantomData,
    })
}

/// Ordered hook lists per `(kind, phase)`
#[derive(Default, Clone)]
pub struct HookRegistry {
    hooks: HashMap<(String, HookPhase), Vec<Arc<dyn Hook>>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: &str, phase: HookPhase, hook: Arc<dyn Hook>) {
        self.hooks.entry((kind.to_string(), phase)).or_default().push(hook);
    }

    pub fn has_hooks(&self, kind: &str, phase: HookPhase) -> bool {
        self.hooks
            .get(&(kind.to_string(), phase))
            .map_or(false, |hooks| !hooks.is_empty())
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.values().map(Vec::len).sum()
    }

    /// Run every hook registered for the object's kind and `phase`. The
    /// first failure stops the chain and is reported as [`ModelError::Hook`].
    pub async fn invoke(
        &self,
        tx: &mut dyn DatabaseTransaction,
        obj: &dyn AnyObject,
        phase: HookPhase,
    ) -> ModelResult<()> {
        let Some(hooks) = self.hooks.get(&(obj.kind().to_string(), phase)) else {
            return Ok(());
        };
        for hook in hooks {
            debug!(kind = obj.kind(), phase = %phase, "running hook");
            if let Err(err) = hook.call(&mut *tx, obj).await {
                return Err(match err {
                    ModelError::Hook { .. } => err,
                    other => ModelError::hook(obj.kind(), phase, other),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.hook_count())
            .finish()
    }
}
