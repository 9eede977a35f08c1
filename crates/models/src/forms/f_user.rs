use super::SystemRoleCommon;
use serde::{Deserialize, Serialize};

/// +genform object:User
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserCommon {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Tenant role when listed through a tenant
    pub role: String,
}

/// +genform object:User
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDetail {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub is_active: bool,
    pub system_role_id: i64,
    pub system_role: Option<Box<SystemRoleCommon>>,
    pub role: String,
}
