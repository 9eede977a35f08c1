use super::{EnvironmentCommon, TenantCommon};
use serde::{Deserialize, Serialize};

/// +genform object:Project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectCommon {
    pub id: i64,
    pub project_name: String,
    pub project_alias: String,
    pub tenant_id: i64,
}

/// +genform object:Project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDetail {
    pub id: i64,
    pub project_name: String,
    pub project_alias: String,
    pub remark: String,
    pub tenant: Option<Box<TenantCommon>>,
    pub environments: Vec<EnvironmentCommon>,
}
