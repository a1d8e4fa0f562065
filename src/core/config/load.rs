//! Configuration loading with env-var overrides.
//!
//! Reads TOML files, supports `[meta] base = "..."` inheritance chains,
//! and applies `RECIPE_API_*` env overrides plus the generation API key.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;

use super::raw::RawConfig;
use super::types::*;

/// Values taken from the process environment, applied on top of the file.
///
/// Tests build this directly instead of mutating env vars.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<String>,
    pub log_level: Option<String>,
    pub debug: Option<bool>,
    pub api_key: Option<String>,
}

impl Overrides {
    /// Snapshot the relevant environment variables. Call after `.env` is loaded.
    pub fn from_env() -> Self {
        let debug = env::var("RECIPE_API_DEBUG")
            .ok()
            .or_else(|| env::var("FLASK_DEBUG").ok())
            .map(|v| parse_flag(&v));

        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .or_else(|| env::var("LLM_API_KEY").ok())
            .filter(|k| !k.trim().is_empty());

        Self {
            bind: env::var("RECIPE_API_BIND").ok(),
            log_level: env::var("RECIPE_API_LOG_LEVEL").ok(),
            debug,
            api_key,
        }
    }
}

/// Interpret a boolean-ish env value. Anything unrecognised is `false`.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Deep-merge two TOML values.
/// Tables are merged recursively: the overlay only needs to specify keys that
/// differ from the base. For every other type (string, integer, array, …)
/// the overlay value replaces the base value wholesale.
fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_tbl), toml::Value::Table(overlay_tbl)) => {
            for (key, ov_val) in overlay_tbl {
                let merged = match base_tbl.remove(&key) {
                    Some(base_val) => merge_toml(base_val, ov_val),
                    None => ov_val,
                };
                base_tbl.insert(key, merged);
            }
            toml::Value::Table(base_tbl)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file, follow any `[meta] base = "..."` chain, and return the
/// fully merged `toml::Value`. `visited` carries canonicalized paths already
/// seen in this chain so circular references are caught early.
fn load_raw_merged(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<toml::Value, AppError> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical) {
        return Err(AppError::Config(format!(
            "circular base reference detected at: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let overlay_val: toml::Value = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    if let Some(base_str) = overlay_val
        .get("meta")
        .and_then(|m| m.get("base"))
        .and_then(|b| b.as_str())
    {
        let base_path = if Path::new(base_str).is_absolute() {
            PathBuf::from(base_str)
        } else {
            path.parent().unwrap_or(Path::new(".")).join(base_str)
        };
        let base_val = load_raw_merged(&base_path, visited)?;
        Ok(merge_toml(base_val, overlay_val))
    } else {
        Ok(overlay_val)
    }
}

/// Load config from the given path, or `config/default.toml`, then apply env-var overrides.
///
/// With no explicit path and no default file, the built-in defaults are used.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let overrides = Overrides::from_env();

    if let Some(path) = config_path {
        return load_from(Path::new(path), &overrides);
    }

    let default_path = Path::new("config/default.toml");
    if default_path.exists() {
        load_from(default_path, &overrides)
    } else {
        resolve(RawConfig::default(), &overrides)
    }
}

/// Internal loader: accepts an explicit path and overrides.
/// Follows `[meta] base = "..."` inheritance chains before resolving.
pub fn load_from(path: &Path, overrides: &Overrides) -> Result<Config, AppError> {
    let merged_val = load_raw_merged(path, &mut HashSet::new())?;

    let parsed: RawConfig = Deserialize::deserialize(merged_val).map_err(|e: toml::de::Error| {
        AppError::Config(format!("config error in {}: {e}", path.display()))
    })?;

    resolve(parsed, overrides)
}

fn resolve(raw: RawConfig, overrides: &Overrides) -> Result<Config, AppError> {
    let s = raw.server;

    let debug = overrides.debug.unwrap_or(s.debug);
    let bind = overrides.bind.clone().unwrap_or(s.bind);
    let log_level = overrides
        .log_level
        .clone()
        .or(s.log_level)
        .unwrap_or_else(|| if debug { "debug" } else { "info" }.to_string());

    if s.generation_timeout_seconds == 0 {
        return Err(AppError::Config(
            "server.generation_timeout_seconds must be greater than zero".into(),
        ));
    }

    let o = raw.llm.openai;
    if o.timeout_seconds == 0 {
        return Err(AppError::Config(
            "llm.openai.timeout_seconds must be greater than zero".into(),
        ));
    }

    Ok(Config {
        log_level,
        server: ServerConfig {
            bind,
            debug,
            generation_timeout: Duration::from_secs(s.generation_timeout_seconds),
        },
        llm: LlmConfig {
            provider: raw.llm.provider,
            openai: OpenAiConfig {
                api_base_url: o.api_base_url,
                model: o.model,
                temperature: o.temperature,
                timeout_seconds: o.timeout_seconds,
                max_tokens: o.max_tokens,
            },
        },
        llm_api_key: overrides.api_key.clone(),
        catalog: CatalogConfig {
            ingredients_path: raw.catalog.ingredients_path.as_deref().map(expand_home),
            cuisines_path: raw.catalog.cuisines_path.as_deref().map(expand_home),
        },
    })
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
