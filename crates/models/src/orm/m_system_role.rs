use super::User;
use serde::{Deserialize, Serialize};

/// SystemRole is a console-wide role, independent of tenants
/// +gen type:object pkfield:id preloads:users
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemRole {
    pub id: i64,
    pub role_name: String,
    pub role_code: String,
    pub users: Vec<User>,
}

pub const SYSTEM_ROLE_ADMIN: &str = "sysadmin";
pub const SYSTEM_ROLE_NORMAL: &str = "normal";
