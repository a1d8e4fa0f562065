//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or an explicit `-f` path), then applies `RECIPE_API_BIND`,
//! `RECIPE_API_LOG_LEVEL`, `RECIPE_API_DEBUG` / `FLASK_DEBUG` and the
//! `OPENAI_API_KEY` credential from the environment.
//!
//! # Module layout
//!
//! - **types**: Public configuration structs (`Config`, `ServerConfig`,
//!   `LlmConfig`, `CatalogConfig`).
//! - **raw**: Raw TOML deserialization types. These mirror the file shape
//!   and use serde defaults; kept private.
//! - **load**: Loading logic: `merge_toml`, `load_raw_merged`, `load`,
//!   `load_from`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{expand_home, load, load_from, parse_flag, Overrides};
pub use types::*;

impl Config {
    /// Safe `Config` for tests: dummy LLM, no API key, no external calls.
    pub fn test_default() -> Self {
        Self {
            log_level: "info".into(),
            server: ServerConfig {
                bind: raw::default_bind(),
                debug: false,
                generation_timeout: std::time::Duration::from_secs(5),
            },
            llm: LlmConfig {
                provider: "dummy".into(),
                openai: OpenAiConfig {
                    api_base_url: "http://localhost:0/v1/chat/completions".into(),
                    model: "test-model".into(),
                    temperature: 0.0,
                    timeout_seconds: 1,
                    max_tokens: 256,
                },
            },
            llm_api_key: None,
            catalog: CatalogConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const MINIMAL_TOML: &str = r#"
[server]
bind = "0.0.0.0:8080"
log_level = "warn"
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_basic_config() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
        assert_eq!(cfg.log_level, "warn");
        assert!(!cfg.server.debug);
        assert_eq!(cfg.llm.provider, "openai");
        assert_eq!(cfg.server.generation_timeout.as_secs(), 90);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let f = write_toml("");
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:5000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.llm.openai.model, "gpt-4o-mini");
        assert!(cfg.llm_api_key.is_none());
        assert!(cfg.catalog.ingredients_path.is_none());
    }

    #[test]
    fn debug_raises_default_log_level() {
        let f = write_toml("[server]\ndebug = true\n");
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert!(cfg.server.debug);
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn explicit_log_level_beats_debug() {
        let f = write_toml("[server]\ndebug = true\nlog_level = \"warn\"\n");
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn env_overrides_apply() {
        let f = write_toml(MINIMAL_TOML);
        let overrides = Overrides {
            bind: Some("127.0.0.1:9999".into()),
            log_level: Some("trace".into()),
            debug: Some(true),
            api_key: Some("sk-test".into()),
        };
        let cfg = load_from(f.path(), &overrides).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:9999");
        assert_eq!(cfg.log_level, "trace");
        assert!(cfg.server.debug);
        assert_eq!(cfg.llm_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn api_key_never_read_from_toml() {
        let f = write_toml("[llm]\napi_key = \"sk-from-file\"\n");
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert!(cfg.llm_api_key.is_none());
    }

    #[test]
    fn zero_generation_timeout_rejected() {
        let f = write_toml("[server]\ngeneration_timeout_seconds = 0\n");
        let err = load_from(f.path(), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("generation_timeout_seconds"));
    }

    #[test]
    fn catalog_paths_resolved() {
        let f = write_toml("[catalog]\ningredients_path = \"/srv/data/ingredients.toml\"\n");
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(
            cfg.catalog.ingredients_path,
            Some(std::path::PathBuf::from("/srv/data/ingredients.toml"))
        );
        assert!(cfg.catalog.cuisines_path.is_none());
    }

    #[test]
    fn flag_parsing() {
        for v in ["1", "true", "True", "TRUE", "yes", " on "] {
            assert!(parse_flag(v), "expected '{v}' to enable");
        }
        for v in ["0", "false", "False", "", "nope"] {
            assert!(!parse_flag(v), "expected '{v}' to disable");
        }
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/recipes/ingredients.toml");
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with("ingredients.toml"));
    }

    #[test]
    fn absolute_path_unchanged() {
        let p = expand_home("/absolute/path");
        assert_eq!(p, std::path::PathBuf::from("/absolute/path"));
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(
            std::path::Path::new("/nonexistent/config.toml"),
            &Overrides::default(),
        );
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    const BASE_TOML: &str = r#"
[server]
bind = "127.0.0.1:5000"
log_level = "info"

[llm]
default = "dummy"

[llm.openai]
model = "gpt-base"
temperature = 0.1
timeout_seconds = 30
"#;

    fn write_named(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let p = dir.path().join(name);
        std::fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn overlay_keeps_base_fields() {
        let dir = TempDir::new().unwrap();
        write_named(&dir, "base.toml", BASE_TOML);
        let overlay = r#"
[meta]
base = "base.toml"

[server]
log_level = "debug"
"#;
        let overlay_path = write_named(&dir, "overlay.toml", overlay);
        let cfg = load_from(&overlay_path, &Overrides::default()).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:5000");
        assert_eq!(cfg.llm.provider, "dummy");
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn overlay_wins_scalar() {
        let dir = TempDir::new().unwrap();
        write_named(&dir, "base.toml", BASE_TOML);
        let overlay = r#"
[meta]
base = "base.toml"

[llm.openai]
model = "gpt-overlay"
"#;
        let overlay_path = write_named(&dir, "overlay.toml", overlay);
        let cfg = load_from(&overlay_path, &Overrides::default()).unwrap();
        assert_eq!(cfg.llm.openai.model, "gpt-overlay");
        assert_eq!(cfg.llm.openai.temperature, 0.1);
        assert_eq!(cfg.llm.openai.timeout_seconds, 30);
    }

    #[test]
    fn missing_base_errors() {
        let dir = TempDir::new().unwrap();
        let overlay = "[meta]\nbase = \"nonexistent.toml\"\n";
        let overlay_path = write_named(&dir, "overlay.toml", overlay);
        let msg = load_from(&overlay_path, &Overrides::default())
            .unwrap_err()
            .to_string();
        assert!(msg.contains("cannot read"));
    }

    #[test]
    fn cycle_detection() {
        let dir = TempDir::new().unwrap();
        let self_path = dir.path().join("self.toml");
        let content = format!("[meta]\nbase = \"{}\"\n\n{BASE_TOML}", self_path.display());
        std::fs::write(&self_path, content).unwrap();
        let msg = load_from(&self_path, &Overrides::default())
            .unwrap_err()
            .to_string();
        assert!(msg.contains("circular"));
    }
}
