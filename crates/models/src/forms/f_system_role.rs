use serde::{Deserialize, Serialize};

/// +genform object:SystemRole
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemRoleCommon {
    pub id: i64,
    pub role_name: String,
    pub role_code: String,
}
