//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults, so an
//! empty file is a valid configuration. The `load` module converts them into
//! the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape: serde target before resolution.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub server: RawServer,
    #[serde(default)]
    pub llm: RawLlm,
    #[serde(default)]
    pub catalog: RawCatalog,
}

#[derive(Deserialize)]
pub(super) struct RawServer {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_generation_timeout_seconds")]
    pub generation_timeout_seconds: u64,
}

impl Default for RawServer {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            log_level: None,
            debug: false,
            generation_timeout_seconds: default_generation_timeout_seconds(),
        }
    }
}

// ── LLM ─────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawLlm {
    #[serde(rename = "default", default = "default_llm_provider")]
    pub provider: String,
    #[serde(default)]
    pub openai: RawOpenAiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            openai: RawOpenAiConfig::default(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawOpenAiConfig {
    #[serde(default = "default_openai_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default = "default_openai_temperature")]
    pub temperature: f32,
    #[serde(default = "default_openai_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_openai_max_tokens")]
    pub max_tokens: u32,
}

impl Default for RawOpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            temperature: default_openai_temperature(),
            timeout_seconds: default_openai_timeout_seconds(),
            max_tokens: default_openai_max_tokens(),
        }
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub(super) struct RawCatalog {
    #[serde(default)]
    pub ingredients_path: Option<String>,
    #[serde(default)]
    pub cuisines_path: Option<String>,
}

// ── Defaults ────────────────────────────────────────────────────────────────

pub(super) fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_generation_timeout_seconds() -> u64 {
    90
}

fn default_llm_provider() -> String {
    "openai".to_string()
}

fn default_openai_api_base_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_temperature() -> f32 {
    0.7
}

fn default_openai_timeout_seconds() -> u64 {
    60
}

fn default_openai_max_tokens() -> u32 {
    1500
}
