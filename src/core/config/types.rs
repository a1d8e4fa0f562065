//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs that the server consumes.
//! Raw TOML deserialization types live in `raw.rs`.

use std::path::PathBuf;
use std::time::Duration;

// ── Server ──────────────────────────────────────────────────────────────────

/// HTTP server configuration (`[server]`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the axum listener binds to.
    pub bind: String,
    /// Debug mode: verbose logging and error detail in generation failures.
    pub debug: bool,
    /// Upper bound on a single recipe generation, enforced by the handler.
    pub generation_timeout: Duration,
}

// ── LLM ─────────────────────────────────────────────────────────────────────

/// OpenAI / OpenAI-compatible provider configuration.
/// Populated from `[llm.openai]` in the TOML.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    /// Model name passed in the request body.
    pub model: String,
    /// Sampling temperature (ignored for models that forbid it).
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Completion token cap sent with each request.
    pub max_tokens: u32,
}

/// LLM configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (e.g. `"openai"`, `"dummy"`).
    /// Maps to `default` in `[llm]` TOML.
    pub provider: String,
    pub openai: OpenAiConfig,
}

// ── Catalog ─────────────────────────────────────────────────────────────────

/// Optional replacements for the embedded lookup tables (`[catalog]`).
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub ingredients_path: Option<PathBuf>,
    pub cuisines_path: Option<PathBuf>,
}

// ── Top-level ───────────────────────────────────────────────────────────────

/// Fully-resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub server: ServerConfig,
    pub llm: LlmConfig,
    /// API key from `OPENAI_API_KEY` (or `LLM_API_KEY`) env.
    /// Never sourced from TOML.
    pub llm_api_key: Option<String>,
    pub catalog: CatalogConfig,
}
