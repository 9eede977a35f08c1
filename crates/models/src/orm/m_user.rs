use super::{SystemRole, Tenant};
use serde::{Deserialize, Serialize};

/// +gen type:object pkfield:id preloads:system_role search:name,email
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Identity provider the account came from
    pub source: String,
    pub is_active: bool,
    pub system_role_id: i64,
    pub system_role: Option<Box<SystemRole>>,
    pub tenants: Vec<Tenant>,
    /// Role in the tenant the user was listed through
    /// +gen readonly
    pub role: String,
}
