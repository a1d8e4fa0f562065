//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Provider instances are shared immutable capabilities: clone them freely.
//! Enum dispatch keeps `complete` a plain `async fn` with no trait objects.

pub mod providers;

use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

/// Failure classes of an LLM round-trip.
///
/// Kinds are kept separate so callers can decide how much to tell clients
/// and which failures are worth retrying.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("no API key configured for provider '{0}'")]
    MissingApiKey(String),
    #[error("provider request timed out: {0}")]
    Timeout(String),
    #[error("provider rejected credentials: {0}")]
    Auth(String),
    #[error("provider rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

// ── Response ──────────────────────────────────────────────────────────────────

/// Token accounting reported by the provider, when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LlmUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// A single completion.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub usage: Option<LlmUsage>,
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    OpenAiCompatible(providers::openai_compatible::OpenAiCompatibleProvider),
    Dummy(providers::dummy::DummyProvider),
}

impl LlmProvider {
    /// Send `content` (with an optional system prompt) and return the reply.
    pub async fn complete(
        &self,
        content: &str,
        system: Option<&str>,
    ) -> Result<LlmResponse, ProviderError> {
        match self {
            LlmProvider::OpenAiCompatible(p) => p.complete(content, system).await,
            LlmProvider::Dummy(p) => p.complete(content, system).await,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::OpenAiCompatible(_) => "openai",
            LlmProvider::Dummy(_) => "dummy",
        }
    }
}
