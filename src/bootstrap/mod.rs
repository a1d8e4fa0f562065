//! Bootstrap layer: modules that run before the server starts.
//!
//! - **logger**: tracing-subscriber initialisation.
//! - **cli**: command-line argument parsing.

pub mod cli;
pub mod logger;
