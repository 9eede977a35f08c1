//! Shared fixtures: hand-written object types in the shape the generator
//! emits, and an in-memory SQLite schema for them.

#![allow(dead_code)]

use gems_core::DatabaseConfig;
use gems_orm::{
    connect, BaseList, Client, ClientBuilder, DatabasePool, DatabaseValue, Object, ObjectList, ObjectType,
    Preload, PreloadKind, RelationEnd, RelationKind, RelationShip, TypeMeta,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const TENANT_META: TypeMeta = TypeMeta {
    kind: "tenant",
    table: "tenants",
    pk_field: "id",
    valid_preloads: &["projects", "users"],
    columns: &["id", "tenant_name", "remark", "is_active"],
    search_fields: &["tenant_name", "remark"],
    preloads: &[
        Preload {
            field: "projects",
            target_table: "projects",
            target_pk: "id",
            fk_column: "tenant_id",
            kind: PreloadKind::HasMany,
        },
        Preload {
            field: "users",
            target_table: "users",
            target_pk: "id",
            fk_column: "tenant_id",
            kind: PreloadKind::ManyToMany {
                via_table: "tenant_user_rels",
                via_target_fk: "user_id",
            },
        },
    ],
};

pub const USER_META: TypeMeta = TypeMeta {
    kind: "user",
    table: "users",
    pk_field: "id",
    valid_preloads: &[],
    columns: &["id", "username", "email"],
    search_fields: &["username", "email"],
    preloads: &[],
};

pub const TENANT_USER_REL_META: TypeMeta = TypeMeta {
    kind: "tenant_user_rel",
    table: "tenant_user_rels",
    pk_field: "id",
    valid_preloads: &["tenant", "user"],
    columns: &["id", "tenant_id", "user_id", "role"],
    search_fields: &[],
    preloads: &[
        Preload {
            field: "tenant",
            target_table: "tenants",
            target_pk: "id",
            fk_column: "tenant_id",
            kind: PreloadKind::BelongsTo,
        },
        Preload {
            field: "user",
            target_table: "users",
            target_pk: "id",
            fk_column: "user_id",
            kind: PreloadKind::BelongsTo,
        },
    ],
};

pub const PROJECT_META: TypeMeta = TypeMeta {
    kind: "project",
    table: "projects",
    pk_field: "id",
    // environments is described but not whitelisted
    valid_preloads: &["tenant"],
    columns: &["id", "project_name", "tenant_id", "remark"],
    search_fields: &["project_name"],
    preloads: &[
        Preload {
            field: "tenant",
            target_table: "tenants",
            target_pk: "id",
            fk_column: "tenant_id",
            kind: PreloadKind::BelongsTo,
        },
        Preload {
            field: "environments",
            target_table: "environments",
            target_pk: "id",
            fk_column: "project_id",
            kind: PreloadKind::HasMany,
        },
    ],
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tenant {
    pub id: i64,
    pub tenant_name: String,
    pub remark: String,
    pub is_active: bool,
    pub projects: Vec<Project>,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Filled from the junction row by sub-resource listings
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantUserRel {
    pub id: i64,
    pub tenant_id: i64,
    pub user_id: i64,
    pub role: String,
    pub tenant: Option<Box<Tenant>>,
    pub user: Option<Box<User>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: i64,
    pub project_name: String,
    pub tenant_id: i64,
    pub remark: String,
    pub tenant: Option<Box<Tenant>>,
}

macro_rules! object_impls {
    ($ty:ident, $list:ident, $meta:ident) => {
        impl ObjectType for $ty {
            fn meta(&self) -> &'static TypeMeta {
                &$meta
            }
        }

        impl Object for $ty {
            const META: &'static TypeMeta = &$meta;

            fn pk_value(&self) -> DatabaseValue {
                DatabaseValue::Int64(self.id)
            }

            fn set_pk_value(&mut self, value: DatabaseValue) {
                if let Some(id) = value.as_i64() {
                    self.id = id;
                }
            }
        }

        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct $list {
            pub items: Vec<$ty>,
            #[serde(flatten)]
            pub base: BaseList,
        }

        impl ObjectType for $list {
            fn meta(&self) -> &'static TypeMeta {
                &$meta
            }
        }

        impl ObjectList for $list {
            type Item = $ty;

            fn items(&self) -> &[$ty] {
                &self.items
            }

            fn items_mut(&mut self) -> &mut Vec<$ty> {
                &mut self.items
            }

            fn page_size(&self) -> (i64, i64) {
                (self.base.page, self.base.size)
            }

            fn set_page_size(&mut self, page: i64, size: i64) {
                self.base.page = page;
                self.base.size = size;
            }

            fn total(&self) -> i64 {
                self.base.total
            }

            fn set_total(&mut self, total: i64) {
                self.base.total = total;
            }
        }
    };
}

object_impls!(Tenant, TenantList, TENANT_META);
object_impls!(User, UserList, USER_META);
object_impls!(TenantUserRel, TenantUserRelList, TENANT_USER_REL_META);
object_impls!(Project, ProjectList, PROJECT_META);

impl RelationShip for TenantUserRel {
    fn left(&self) -> RelationEnd {
        RelationEnd {
            meta: &TENANT_META,
            pk: DatabaseValue::Int64(self.tenant_id),
        }
    }

    fn right(&self) -> RelationEnd {
        RelationEnd {
            meta: &USER_META,
            pk: DatabaseValue::Int64(self.user_id),
        }
    }
}

const SCHEMA: &[&str] = &[
    "CREATE TABLE tenants (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tenant_name TEXT NOT NULL UNIQUE,
        remark TEXT NOT NULL DEFAULT '',
        is_active BOOLEAN NOT NULL DEFAULT 0
    )",
    "CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE tenant_user_rels (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tenant_id INTEGER NOT NULL REFERENCES tenants(id),
        user_id INTEGER NOT NULL REFERENCES users(id),
        role TEXT NOT NULL DEFAULT 'ordinary',
        UNIQUE (tenant_id, user_id)
    )",
    "CREATE TABLE projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_name TEXT NOT NULL,
        tenant_id INTEGER NOT NULL REFERENCES tenants(id),
        remark TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE clusters (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        agent_addr TEXT,
        mode TEXT NOT NULL DEFAULT 'apiServerProxy',
        agent_cert TEXT,
        agent_key TEXT,
        agent_ca TEXT,
        kube_config TEXT,
        \"primary\" BOOLEAN NOT NULL DEFAULT 0
    )",
];

/// Fresh in-memory store with the fixture schema
pub async fn pool() -> Arc<dyn DatabasePool> {
    let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();
    for statement in SCHEMA {
        pool.execute(statement, &[]).await.unwrap();
    }
    pool
}

/// Builder with the fixture relations registered
pub fn builder(pool: Arc<dyn DatabasePool>) -> ClientBuilder {
    Client::builder(pool)
        .relation(&TENANT_META, &USER_META, Some(&TENANT_USER_REL_META), RelationKind::ManyToMany)
        .relation(&TENANT_META, &PROJECT_META, None, RelationKind::Ownership)
}

pub async fn client() -> Client {
    builder(pool().await).build()
}

pub fn tenant(name: &str) -> Tenant {
    Tenant {
        tenant_name: name.to_string(),
        remark: format!("{} remark", name),
        is_active: true,
        ..Default::default()
    }
}

pub fn user(name: &str) -> User {
    User {
        username: name.to_string(),
        email: format!("{}@example.com", name),
        ..Default::default()
    }
}

pub fn project(name: &str, tenant_id: i64) -> Project {
    Project {
        project_name: name.to_string(),
        tenant_id,
        ..Default::default()
    }
}
