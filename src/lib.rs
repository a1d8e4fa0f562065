//! Recipe generation HTTP API.
//!
//! Library root: exposes internals for integration tests. The binary entry
//! point is `src/main.rs`.

pub mod bootstrap;
pub mod catalog;
pub mod core;
pub mod http;
pub mod llm;
pub mod recipes;

pub use crate::bootstrap::logger;
pub use crate::core::{config, error};
