//! Storage types
//!
//! `zz_generated.rs` is produced by `gems-gen` from the `+gen` annotations
//! of the other files in this directory.

mod m_cluster;
mod m_environment;
mod m_project;
mod m_system_role;
mod m_tenant;
mod m_user;
mod zz_generated;

pub use m_cluster::*;
pub use m_environment::*;
pub use m_project::*;
pub use m_system_role::*;
pub use m_tenant::*;
pub use m_user::*;
pub use zz_generated::*;
