//! # gems-orm: generic object-relational access layer
//!
//! A single typed [`Client`] performs CRUD, paging, ownership and
//! many-to-many traversal and transactional lifecycle hooks over any type
//! implementing [`Object`]. Type metadata is generated by `gems-codegen`.

pub mod backends;
pub mod client;
pub mod cluster;
pub mod context;
pub mod database;
pub mod error;
pub mod hooks;
pub mod object;
pub mod query;
pub mod relation;
pub mod security;
pub mod sync;
pub mod transaction;

pub use backends::{
    DatabaseBackendRegistry, DatabaseBackendType, DatabasePool, DatabaseRow, DatabaseTransaction,
    DatabaseValue, SqlDialect,
};
pub use client::{find_in_tx, Client, ClientBuilder, BATCH_SIZE};
pub use cluster::{ClusterGetter, ClusterInfo};
pub use context::Context;
pub use database::{connect, connect_from_env, health_report, PoolHealthReport};
pub use error::{ModelError, ModelResult};
pub use hooks::{typed, Hook, HookPhase, HookRegistry, TypedHook};
pub use object::{
    AnyObject, BaseList, Object, ObjectList, ObjectType, Preload, PreloadKind, RelationEnd, RelationShip,
    TypeMeta,
};
pub use query::options::{self, Query, QueryOption};
pub use query::{Cond, OrderDirection, QueryOperator};
pub use relation::{relation_key, Relation, RelationKind, RelationRegistry};
pub use sync::{KubeSync, MemorySync};
