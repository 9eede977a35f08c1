//! Cluster lookups for the Kubernetes-sync collaborator

use crate::backends::DatabaseRow;
use crate::client::Client;
use crate::context::Context;
use crate::error::{ModelError, ModelResult};
use crate::query::{Filter, OrderDirection, SelectBuilder};
use async_trait::async_trait;

const CLUSTER_TABLE: &str = "clusters";

/// Connection details of a managed cluster
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterInfo {
    pub name: String,
    pub agent_addr: String,
    pub mode: String,
    pub agent_cert: String,
    pub agent_key: String,
    pub agent_ca: String,
    pub kube_config: String,
}

impl ClusterInfo {
    fn from_row(row: &dyn DatabaseRow) -> ModelResult<Self> {
        let text = |column: &str| -> ModelResult<String> {
            Ok(row.get_by_name(column)?.as_str().unwrap_or_default().to_string())
        };
        Ok(Self {
            name: text("name")?,
            agent_addr: text("agent_addr")?,
            mode: text("mode")?,
            agent_cert: text("agent_cert")?,
            agent_key: text("agent_key")?,
            agent_ca: text("agent_ca")?,
            kube_config: text("kube_config")?,
        })
    }
}

#[async_trait]
pub trait ClusterGetter: Send + Sync {
    async fn list_cluster_names(&self, ctx: &Context) -> ModelResult<Vec<String>>;

    async fn get_cluster_by_name(&self, ctx: &Context, name: &str) -> ModelResult<ClusterInfo>;

    /// The cluster flagged `primary`
    async fn get_primary_cluster(&self, ctx: &Context) -> ModelResult<ClusterInfo>;
}

const INFO_COLUMNS: [&str; 7] = [
    "name",
    "agent_addr",
    "mode",
    "agent_cert",
    "agent_key",
    "agent_ca",
    "kube_config",
];

impl Client {
    async fn first_cluster(&self, filter: Filter) -> ModelResult<Option<ClusterInfo>> {
        let mut select = SelectBuilder::new(CLUSTER_TABLE)?;
        for column in INFO_COLUMNS {
            select.column(column)?;
        }
        select.filter = filter;
        select.order_by("id", OrderDirection::Asc)?;
        select.limit(1);

        let (sql, params) = select.build(self.dialect())?;
        match self.pool.fetch_optional(&sql, &params).await? {
            Some(row) => Ok(Some(ClusterInfo::from_row(row.as_ref())?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ClusterGetter for Client {
    async fn list_cluster_names(&self, ctx: &Context) -> ModelResult<Vec<String>> {
        ctx.run(async {
            let mut select = SelectBuilder::new(CLUSTER_TABLE)?;
            select.column("name")?;
            select.order_by("name", OrderDirection::Asc)?;
            let (sql, params) = select.build(self.dialect())?;

            let rows = self.pool.fetch_all(&sql, &params).await?;
            rows.iter()
                .map(|row| -> ModelResult<String> {
                    Ok(row.get_by_index(0)?.as_str().unwrap_or_default().to_string())
                })
                .collect()
        })
        .await
    }

    async fn get_cluster_by_name(&self, ctx: &Context, name: &str) -> ModelResult<ClusterInfo> {
        ctx.run(async {
            let mut filter = Filter::new();
            filter.push_eq(CLUSTER_TABLE, "name", name.into())?;
            self.first_cluster(filter)
                .await?
                .ok_or_else(|| ModelError::NotFound(CLUSTER_TABLE.to_string()))
        })
        .await
    }

    async fn get_primary_cluster(&self, ctx: &Context) -> ModelResult<ClusterInfo> {
        ctx.run(async {
            let mut filter = Filter::new();
            filter.push_eq(CLUSTER_TABLE, "primary", true.into())?;
            let primary = self.first_cluster(filter).await?;
            primary.ok_or_else(|| {
                tracing::warn!("no manager cluster found");
                ModelError::NotFound(CLUSTER_TABLE.to_string())
            })
        })
        .await
    }
}
