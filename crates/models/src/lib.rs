//! # gems-models
//!
//! Storage types of the gems console (`orm`), the forms exchanged with API
//! callers (`forms`) and the hooks that keep clusters in step with the
//! store. Both `zz_generated.rs` files are written by `gems-gen`.

pub mod client;
pub mod forms;
pub mod hooks;
pub mod orm;

pub use client::{new_client, relations};
