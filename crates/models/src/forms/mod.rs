//! Form types exchanged with API callers
//!
//! Each form names its storage type with `+genform object:<Type>`;
//! `zz_generated.rs` holds the conversions in both directions.

mod f_environment;
mod f_project;
mod f_system_role;
mod f_tenant;
mod f_user;
mod zz_generated;

pub use f_environment::*;
pub use f_project::*;
pub use f_system_role::*;
pub use f_tenant::*;
pub use f_user::*;
pub use zz_generated::*;
