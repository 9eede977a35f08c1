use serde::{Deserialize, Serialize};

/// +genform object:Environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentCommon {
    pub id: i64,
    pub environment_name: String,
    pub namespace: String,
    pub meta_type: String,
    pub project_id: i64,
    pub cluster_id: i64,
}
