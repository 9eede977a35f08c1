use super::{Project, TenantResourceQuota, User};
use serde::{Deserialize, Serialize};

/// Tenant groups users, projects and per-cluster resource quotas
/// +gen type:object pkfield:id preloads:users,projects,resource_quotas search:tenant_name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tenant {
    pub id: i64,
    pub tenant_name: String,
    pub remark: String,
    pub is_active: bool,
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub resource_quotas: Vec<TenantResourceQuota>,
}

pub const TENANT_ROLE_ADMIN: &str = "admin";
pub const TENANT_ROLE_ORDINARY: &str = "ordinary";

/// Membership of a user in a tenant
/// +gen type:objectrel pkfield:id preloads:tenant,user leftfield:tenant rightfield:user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantUserRel {
    pub id: i64,
    pub tenant_id: i64,
    pub tenant: Option<Box<Tenant>>,
    pub user_id: i64,
    pub user: Option<Box<User>>,
    pub role: String,
}
