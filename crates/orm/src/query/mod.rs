//! Query options and SQL generation

pub mod options;
pub mod sql;
pub mod types;

pub use options::*;
pub use sql::{Filter, SelectBuilder};
pub use types::*;
