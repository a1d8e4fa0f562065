//! CORS configuration.

use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Permit cross-origin calls from any origin, limited to the methods and
/// headers the routes use. Credentials are never allowed.
pub fn setup_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
