//! Lifecycle hooks that push tenant and environment state into the
//! clusters through [`KubeSync`]
//!
//! Every hook runs inside the transaction of the mutation that fired it and
//! reads related rows through that transaction. A failed sync call fails
//! the hook, which rolls the mutation back.

use crate::orm::{Cluster, Environment, Project, Tenant, TenantResourceQuota, TenantUserRel, TENANT_ROLE_ADMIN};
use async_trait::async_trait;
use gems_orm::options::{preloads, where_equal};
use gems_orm::{find_in_tx, ClientBuilder, DatabaseTransaction, HookPhase, KubeSync, ModelError, ModelResult, Object, TypedHook};
use serde_json::{json, Map, Value as JsonValue};
use std::sync::Arc;
use tracing::{debug, error};

/// Resource kind of an environment
pub const ENVIRONMENT_RESOURCE: &str = "environment";
/// Resource kind of a tenant's presence on one cluster
pub const TENANT_RESOURCE: &str = "tenant";

const DEFAULT_LIMIT_RANGE_NAME: &str = "default";
const DEFAULT_RESOURCE_QUOTA_NAME: &str = "default";

/// Key of a resource on a cluster: `<cluster>/<name>`
pub fn resource_key(cluster: &str, name: &str) -> String {
    format!("{}/{}", cluster, name)
}

/// Register every sync hook on `builder`
pub fn register(builder: ClientBuilder, sync: Arc<dyn KubeSync>) -> ClientBuilder {
    builder
        .typed_hook::<Environment, _>(HookPhase::AfterCreate, EnvironmentApply { sync: sync.clone() })
        .typed_hook::<Environment, _>(HookPhase::AfterUpdate, EnvironmentApply { sync: sync.clone() })
        .typed_hook::<Environment, _>(HookPhase::AfterDelete, EnvironmentRemove { sync: sync.clone() })
        .typed_hook::<Project, _>(HookPhase::AfterDelete, ProjectRemove { sync: sync.clone() })
        .typed_hook::<Tenant, _>(HookPhase::AfterDelete, TenantRemove { sync: sync.clone() })
        .typed_hook::<TenantResourceQuota, _>(HookPhase::AfterCreate, TenantQuotaApply { sync: sync.clone() })
        .typed_hook::<TenantResourceQuota, _>(HookPhase::AfterUpdate, TenantQuotaApply { sync })
}

/// Load the stored row with primary key `id`
async fn load<T: Object>(tx: &mut dyn DatabaseTransaction, id: i64, with: &[&str]) -> ModelResult<T> {
    let opts = [where_equal(T::META.pk_field, id), preloads(with.iter().copied())];
    find_in_tx::<T>(tx, &opts)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ModelError::NotFound(T::META.table.to_string()))
}

fn require<'a>(value: &'a str, what: &str) -> ModelResult<&'a str> {
    if value.is_empty() {
        return Err(ModelError::Validation(format!("{} is not set", what)));
    }
    Ok(value)
}

fn parse_document(text: &str) -> ModelResult<JsonValue> {
    if text.trim().is_empty() {
        return Ok(JsonValue::Null);
    }
    Ok(serde_json::from_str(text)?)
}

/// Limit range items keyed by limit type become a list, each item carrying
/// its `type`
fn limit_range_items(text: &str) -> ModelResult<Vec<JsonValue>> {
    let JsonValue::Object(items) = parse_document(text)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|(limit_type, item)| {
            let mut item = match item {
                JsonValue::Object(map) => map,
                _ => Map::new(),
            };
            item.insert("type".to_string(), JsonValue::String(limit_type));
            JsonValue::Object(item)
        })
        .collect())
}

fn cluster_name(cluster: Option<&Cluster>) -> ModelResult<&str> {
    let name = cluster.map(|c| c.name.as_str()).unwrap_or_default();
    require(name, "cluster name")
}

/// Create or refresh the environment resource from the stored row
struct EnvironmentApply {
    sync: Arc<dyn KubeSync>,
}

#[async_trait]
impl TypedHook<Environment> for EnvironmentApply {
    async fn call(&self, tx: &mut dyn DatabaseTransaction, obj: &Environment) -> ModelResult<()> {
        // an update may carry only the changed columns
        let env: Environment = load(&mut *tx, obj.id, &["cluster"]).await?;
        let project: Project = load(&mut *tx, env.project_id, &["tenant"]).await?;
        let tenant = project.tenant.as_deref().map(|t| t.tenant_name.as_str()).unwrap_or_default();

        let mut spec = json!({
            "namespace": env.namespace,
            "project": project.project_name,
            "tenant": require(tenant, "tenant name")?,
            "limitRangeName": DEFAULT_LIMIT_RANGE_NAME,
            "resourceQuotaName": DEFAULT_RESOURCE_QUOTA_NAME,
            "deletePolicy": env.delete_policy,
            "resourceQuota": parse_document(&env.resource_quota)?,
        });
        let limit_range = limit_range_items(&env.limit_range)?;
        if !limit_range.is_empty() {
            spec["limitRange"] = JsonValue::Array(limit_range);
        }

        let key = resource_key(cluster_name(env.cluster.as_deref())?, &env.environment_name);
        debug!(key = %key, "syncing environment");
        self.sync.create_or_update(ENVIRONMENT_RESOURCE, &key, spec).await
    }
}

/// Remove the environment resource. The deleted object must carry its name
/// and cluster.
struct EnvironmentRemove {
    sync: Arc<dyn KubeSync>,
}

#[async_trait]
impl TypedHook<Environment> for EnvironmentRemove {
    async fn call(&self, tx: &mut dyn DatabaseTransaction, env: &Environment) -> ModelResult<()> {
        let name = require(&env.environment_name, "environment name")?;
        let cluster: Cluster = load(&mut *tx, env.cluster_id, &[]).await?;
        self.sync
            .delete(ENVIRONMENT_RESOURCE, &resource_key(&cluster.name, name))
            .await
    }
}

/// Remove the resources of every environment of a deleted project
struct ProjectRemove {
    sync: Arc<dyn KubeSync>,
}

#[async_trait]
impl TypedHook<Project> for ProjectRemove {
    async fn call(&self, tx: &mut dyn DatabaseTransaction, project: &Project) -> ModelResult<()> {
        let opts = [where_equal("project_id", project.id), preloads(["cluster"])];
        let environments = find_in_tx::<Environment>(tx, &opts).await?;
        for env in &environments {
            let key = resource_key(cluster_name(env.cluster.as_deref())?, &env.environment_name);
            self.sync.delete(ENVIRONMENT_RESOURCE, &key).await?;
        }
        Ok(())
    }
}

/// Remove the tenant from every cluster it holds a quota on
struct TenantRemove {
    sync: Arc<dyn KubeSync>,
}

#[async_trait]
impl TypedHook<Tenant> for TenantRemove {
    async fn call(&self, tx: &mut dyn DatabaseTransaction, tenant: &Tenant) -> ModelResult<()> {
        let name = require(&tenant.tenant_name, "tenant name")?;
        let opts = [where_equal("tenant_id", tenant.id), preloads(["cluster"])];
        for quota in find_in_tx::<TenantResourceQuota>(tx, &opts).await? {
            let cluster = cluster_name(quota.cluster.as_deref())?;
            if let Err(err) = self.sync.delete(TENANT_RESOURCE, &resource_key(cluster, name)).await {
                error!(tenant = name, cluster, error = %err, "delete tenant resource failed");
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Apply the tenant resource of a quota: its members split into admins and
/// ordinary members, plus the quota itself
struct TenantQuotaApply {
    sync: Arc<dyn KubeSync>,
}

#[async_trait]
impl TypedHook<TenantResourceQuota> for TenantQuotaApply {
    async fn call(&self, tx: &mut dyn DatabaseTransaction, obj: &TenantResourceQuota) -> ModelResult<()> {
        let quota: TenantResourceQuota = load(&mut *tx, obj.id, &["tenant", "cluster"]).await?;
        let tenant = quota.tenant.as_deref().map(|t| t.tenant_name.as_str()).unwrap_or_default();
        let tenant = require(tenant, "tenant name")?;

        let opts = [where_equal("tenant_id", quota.tenant_id), preloads(["user"])];
        let (mut admins, mut members) = (Vec::new(), Vec::new());
        for rel in find_in_tx::<TenantUserRel>(tx, &opts).await? {
            let Some(user) = rel.user else { continue };
            if rel.role == TENANT_ROLE_ADMIN {
                admins.push(user.name);
            } else {
                members.push(user.name);
            }
        }

        let spec = json!({
            "tenant": tenant,
            "admin": admins,
            "members": members,
            "resourceQuota": parse_document(&quota.content)?,
        });
        let key = resource_key(cluster_name(quota.cluster.as_deref())?, tenant);
        self.sync.create_or_update(TENANT_RESOURCE, &key, spec).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_range_items_carry_their_type() {
        let items = limit_range_items(r#"{"Container": {"max": {"cpu": "2"}}, "Pod": {}}"#).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().any(|i| i["type"] == "Container" && i["max"]["cpu"] == "2"));
        assert!(items.iter().any(|i| i["type"] == "Pod"));
        assert!(limit_range_items("").unwrap().is_empty());
        assert!(limit_range_items("{broken").is_err());
    }

    #[test]
    fn test_resource_key() {
        assert_eq!(resource_key("prod", "web-dev"), "prod/web-dev");
    }
}
