//! Client wiring: the relations between console objects and their hooks

use crate::hooks;
use crate::orm::{
    CLUSTER_META, ENVIRONMENT_META, PROJECT_META, SYSTEM_ROLE_META, TENANT_META, TENANT_RESOURCE_QUOTA_META,
    TENANT_USER_REL_META, USER_META,
};
use gems_orm::{Client, ClientBuilder, DatabasePool, KubeSync, RelationKind};
use std::sync::Arc;

/// Builder with every console relation registered and no hooks
pub fn relations(pool: Arc<dyn DatabasePool>) -> ClientBuilder {
    Client::builder(pool)
        .relation(&TENANT_META, &USER_META, Some(&TENANT_USER_REL_META), RelationKind::ManyToMany)
        .relation(&TENANT_META, &PROJECT_META, None, RelationKind::Ownership)
        .relation(&TENANT_META, &TENANT_RESOURCE_QUOTA_META, None, RelationKind::Ownership)
        .relation(&PROJECT_META, &ENVIRONMENT_META, None, RelationKind::Ownership)
        .relation(&CLUSTER_META, &ENVIRONMENT_META, None, RelationKind::Ownership)
        .relation(&CLUSTER_META, &TENANT_RESOURCE_QUOTA_META, None, RelationKind::Ownership)
        .relation(&SYSTEM_ROLE_META, &USER_META, None, RelationKind::Ownership)
}

/// Client over `pool` whose hooks sync through `sync`
pub fn new_client(pool: Arc<dyn DatabasePool>, sync: Arc<dyn KubeSync>) -> Client {
    hooks::register(relations(pool), sync).build()
}
