//! HTTP surface: axum router, shared state and the server loop.
//!
//! ## URL layout
//!
//! ```text
//! GET  /                               → service status
//! POST /api/generate-recipe
//! GET  /api/ingredient-substitutes     ?ingredient=&dietary_restrictions=…
//! GET  /api/ingredient-pairings        ?ingredient=
//! GET  /api/cuisines
//! GET  /api/cuisines/{cuisine}
//! ```
//!
//! Every response body is JSON. Cross-origin requests are allowed from any
//! origin.

mod api;
mod cors;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::AppError;
use crate::recipes::RecipeGenerator;

// ── Shared request state ──────────────────────────────────────────────────────

/// Axum router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone: the generator is reference-counted. Nothing in here is
/// mutated after startup.
#[derive(Clone)]
pub struct ApiState {
    pub generator: Arc<RecipeGenerator>,
    /// Include provider detail in generation error bodies.
    pub debug: bool,
    /// Upper bound on one `generate-recipe` call.
    pub generation_timeout: Duration,
}

impl ApiState {
    pub fn new(generator: Arc<RecipeGenerator>, debug: bool, generation_timeout: Duration) -> Self {
        Self { generator, debug, generation_timeout }
    }
}

// ── Server ────────────────────────────────────────────────────────────────────

pub struct HttpServer {
    bind_addr: String,
    state: ApiState,
}

impl HttpServer {
    pub fn new(bind_addr: impl Into<String>, state: ApiState) -> Self {
        Self { bind_addr: bind_addr.into(), state }
    }

    /// Serve until `shutdown` is cancelled, then drain in-flight requests.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), AppError> {
        let bind_addr = self.bind_addr;
        let router = build_router(self.state);

        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

        info!(%bind_addr, "http server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(|e| AppError::Server(format!("axum server error: {e}")))?;

        info!("http server shut down");
        Ok(())
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/generate-recipe",         post(api::generate_recipe))
        .route("/api/ingredient-substitutes",  get(api::ingredient_substitutes))
        .route("/api/ingredient-pairings",     get(api::ingredient_pairings))
        .route("/api/cuisines",                get(api::cuisines))
        .route("/api/cuisines/{cuisine}",      get(api::cuisine_detail))
        .route("/",                            get(ui::root))
        .fallback(ui::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors::setup_cors())
        .with_state(state)
}
