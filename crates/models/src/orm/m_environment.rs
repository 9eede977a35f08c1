use super::{Cluster, Project};
use serde::{Deserialize, Serialize};

/// Environment is a namespace of one project on one cluster
/// +gen type:object pkfield:id preloads:project,cluster search:environment_name,namespace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub id: i64,
    pub environment_name: String,
    pub namespace: String,
    /// dev, test or prod
    pub meta_type: String,
    /// `delNamespace` removes the namespace with the environment
    pub delete_policy: String,
    pub remark: String,
    /// JSON object of limit range items keyed by limit type
    pub limit_range: String,
    /// JSON object of resource quantities
    pub resource_quota: String,
    pub project_id: i64,
    pub project: Option<Box<Project>>,
    pub cluster_id: i64,
    pub cluster: Option<Box<Cluster>>,
}
