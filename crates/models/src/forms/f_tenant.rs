use super::{ProjectCommon, UserCommon};
use serde::{Deserialize, Serialize};

/// +genform object:Tenant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantCommon {
    pub id: i64,
    pub tenant_name: String,
}

/// +genform object:Tenant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantDetail {
    pub id: i64,
    pub tenant_name: String,
    pub remark: String,
    pub is_active: bool,
    pub projects: Vec<ProjectCommon>,
}

/// +genform object:TenantUserRel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantUserRelCommon {
    pub id: i64,
    pub tenant_id: i64,
    pub tenant: Option<Box<TenantCommon>>,
    pub user_id: i64,
    pub user: Option<Box<UserCommon>>,
    pub role: String,
}
