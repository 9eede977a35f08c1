#![allow(dead_code)]

use gems_core::DatabaseConfig;
use gems_models::orm::{Cluster, Environment, Project, Tenant, User};
use gems_orm::{connect, Client, Context, DatabasePool, MemorySync, Object};
use std::sync::Arc;

const SCHEMA: &[&str] = &[
    "CREATE TABLE system_roles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        role_name TEXT NOT NULL DEFAULT '',
        role_code TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL DEFAULT '',
        source TEXT NOT NULL DEFAULT '',
        is_active BOOLEAN NOT NULL DEFAULT 0,
        system_role_id INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE tenants (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tenant_name TEXT NOT NULL UNIQUE,
        remark TEXT NOT NULL DEFAULT '',
        is_active BOOLEAN NOT NULL DEFAULT 0
    )",
    "CREATE TABLE tenant_user_rels (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tenant_id INTEGER NOT NULL,
        user_id INTEGER NOT NULL,
        role TEXT NOT NULL DEFAULT 'ordinary',
        UNIQUE (tenant_id, user_id)
    )",
    "CREATE TABLE projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_name TEXT NOT NULL,
        project_alias TEXT NOT NULL DEFAULT '',
        remark TEXT NOT NULL DEFAULT '',
        tenant_id INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE clusters (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        api_server TEXT NOT NULL DEFAULT '',
        agent_addr TEXT NOT NULL DEFAULT '',
        mode TEXT NOT NULL DEFAULT 'apiServerProxy',
        agent_cert TEXT NOT NULL DEFAULT '',
        agent_key TEXT NOT NULL DEFAULT '',
        agent_ca TEXT NOT NULL DEFAULT '',
        kube_config TEXT NOT NULL DEFAULT '',
        \"primary\" BOOLEAN NOT NULL DEFAULT 0
    )",
    "CREATE TABLE environments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        environment_name TEXT NOT NULL,
        namespace TEXT NOT NULL DEFAULT '',
        meta_type TEXT NOT NULL DEFAULT '',
        delete_policy TEXT NOT NULL DEFAULT '',
        remark TEXT NOT NULL DEFAULT '',
        limit_range TEXT NOT NULL DEFAULT '',
        resource_quota TEXT NOT NULL DEFAULT '',
        project_id INTEGER NOT NULL DEFAULT 0,
        cluster_id INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE tenant_resource_quotas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        content TEXT NOT NULL DEFAULT '',
        tenant_id INTEGER NOT NULL DEFAULT 0,
        cluster_id INTEGER NOT NULL DEFAULT 0
    )",
];

pub async fn pool() -> Arc<dyn DatabasePool> {
    let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();
    for statement in SCHEMA {
        pool.execute(statement, &[]).await.unwrap();
    }
    pool
}

/// Client with every console relation and hook, syncing into the returned
/// in-memory resource store
pub async fn client() -> (Client, Arc<MemorySync>) {
    let sync = Arc::new(MemorySync::new());
    let client = gems_models::new_client(pool().await, sync.clone());
    (client, sync)
}

pub async fn create<T: Object>(client: &Client, mut obj: T) -> T {
    client.create(&Context::background(), &mut obj, &[]).await.unwrap();
    obj
}

pub fn user(name: &str) -> User {
    User {
        name: name.to_string(),
        email: format!("{}@example.com", name),
        is_active: true,
        ..Default::default()
    }
}

pub fn tenant(name: &str) -> Tenant {
    Tenant {
        tenant_name: name.to_string(),
        is_active: true,
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

pub fn cluster(name: &str) -> Cluster {
    Cluster {
        name: name.to_string(),
        api_server: format!("https://{}.example.com:6443", name),
        ..Default::default()
    }
}

pub fn environment(name: &str, project_id: i64, cluster_id: i64) -> Environment {
    Environment {
        environment_name: name.to_string(),
        namespace: name.to_string(),
        meta_type: "dev".to_string(),
        project_id,
        cluster_id,
        ..Default::default()
    }
}
