use super::{Environment, Tenant};
use serde::{Deserialize, Serialize};

/// +gen type:object pkfield:id preloads:tenant,environments search:project_name,project_alias
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: i64,
    pub project_name: String,
    pub project_alias: String,
    pub remark: String,
    pub tenant_id: i64,
    pub tenant: Option<Box<Tenant>>,
    pub environments: Vec<Environment>,
}
