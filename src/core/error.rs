//! Application-wide error types.
//!
//! Request-level failures (validation, generation) never surface here; the
//! HTTP layer maps those to responses. `AppError` covers startup and
//! server-lifecycle failures only.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_error_display() {
        let e = AppError::Config("missing field".into());
        assert!(e.to_string().starts_with("config error"));
        assert!(e.to_string().contains("missing field"));
    }

    #[test]
    fn catalog_error_display() {
        let e = AppError::Catalog("duplicate ingredient 'rice'".into());
        assert!(e.to_string().contains("duplicate ingredient"));
    }

    #[test]
    fn server_error_display() {
        let e = AppError::Server("bind failed".into());
        assert_eq!(e.to_string(), "server error: bind failed");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: AppError = io_err.into();
        assert!(e.to_string().contains("io error"));
        let _: &dyn Error = &e;
    }
}
