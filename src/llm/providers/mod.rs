//! LLM provider implementations.
//!
//! `build(config, api_key)` is the factory: called at startup.
//! Adding a new backend = new module + new match arm.

pub mod dummy;
pub mod openai_compatible;

use crate::config::LlmConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct a `LlmProvider` from config and an optional API key.
///
/// `api_key` is sourced from `OPENAI_API_KEY` env (never TOML). The hosted
/// `openai` provider requires one; `openai-compatible` allows keyless local
/// servers.
pub fn build(config: &LlmConfig, api_key: Option<String>) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider)),
        "openai" | "openai-compatible" => {
            if config.provider == "openai" && api_key.is_none() {
                return Err(ProviderError::MissingApiKey(config.provider.clone()));
            }
            let oai = &config.openai;
            let p = openai_compatible::OpenAiCompatibleProvider::new(
                oai.api_base_url.clone(),
                oai.model.clone(),
                oai.temperature,
                oai.max_tokens,
                oai.timeout_seconds,
                api_key,
            )?;
            Ok(LlmProvider::OpenAiCompatible(p))
        }
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn builds_dummy() {
        let cfg = Config::test_default();
        let p = build(&cfg.llm, None).unwrap();
        assert_eq!(p.name(), "dummy");
    }

    #[test]
    fn openai_requires_key() {
        let mut cfg = Config::test_default();
        cfg.llm.provider = "openai".into();
        let err = build(&cfg.llm, None).unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey(_)));
    }

    #[test]
    fn openai_compatible_allows_keyless() {
        let mut cfg = Config::test_default();
        cfg.llm.provider = "openai-compatible".into();
        let p = build(&cfg.llm, None).unwrap();
        assert_eq!(p.name(), "openai");
    }

    #[test]
    fn unknown_provider_errors() {
        let mut cfg = Config::test_default();
        cfg.llm.provider = "clippy".into();
        let err = build(&cfg.llm, None).unwrap_err();
        assert!(err.to_string().contains("clippy"));
    }
}
