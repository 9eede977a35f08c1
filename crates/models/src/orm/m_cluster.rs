use super::{Environment, Tenant};
use serde::{Deserialize, Serialize};

/// +gen type:object pkfield:id preloads:environments search:name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub id: i64,
    pub name: String,
    pub api_server: String,
    pub agent_addr: String,
    /// How the console reaches the agent: `service` or `apiServerProxy`
    pub mode: String,
    pub agent_cert: String,
    pub agent_key: String,
    pub agent_ca: String,
    pub kube_config: String,
    /// Marks the cluster the console itself runs in
    pub primary: bool,
    pub environments: Vec<Environment>,
}

/// Resource quota of a tenant on one cluster
/// +gen type:object pkfield:id preloads:tenant,cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantResourceQuota {
    pub id: i64,
    /// JSON object of resource quantities
    pub content: String,
    pub tenant_id: i64,
    pub tenant: Option<Box<Tenant>>,
    pub cluster_id: i64,
    pub cluster: Option<Box<Cluster>>,
}
