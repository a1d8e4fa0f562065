//! tracing-subscriber setup.
//!
//! A bare level such as `"debug"` applies to this crate and to the request
//! spans emitted by `tower_http`'s `TraceLayer`. Dependencies stay at `warn`
//! (or quieter, if the requested level is quieter). A full `EnvFilter`
//! directive is passed through untouched.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Targets that follow the configured level.
const APP_TARGETS: &[&str] = &["recipe_api", "tower_http"];

fn level_name(level: LevelFilter) -> String {
    level.to_string().to_ascii_lowercase()
}

/// Expand a level into filter directives.
pub fn directives_for(level: &str) -> String {
    let Ok(filter) = parse_level(level) else {
        return level.to_string();
    };
    let name = level_name(filter);
    let mut out = level_name(filter.min(LevelFilter::WARN));
    for target in APP_TARGETS {
        out.push_str(&format!(",{target}={name}"));
    }
    out
}

/// Directive strings to try, in order. `prefer_level` is set when the level
/// came from the command line; otherwise a non-blank `RUST_LOG` goes first.
fn candidates(level: &str, rust_log: Option<&str>, prefer_level: bool) -> Vec<String> {
    let configured = directives_for(level);
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(env) if prefer_level => vec![configured, env.to_string()],
        Some(env) => vec![env.to_string(), configured],
        None => vec![configured],
    }
}

fn build_filter(
    level: &str,
    rust_log: Option<&str>,
    prefer_level: bool,
) -> Result<EnvFilter, AppError> {
    let mut errors = Vec::new();
    for directives in candidates(level, rust_log, prefer_level) {
        match EnvFilter::try_new(&directives) {
            Ok(filter) => return Ok(filter),
            Err(e) => errors.push(format!("'{directives}': {e}")),
        }
    }
    Err(AppError::Logger(format!("no usable log filter: {}", errors.join("; "))))
}

/// Install the global subscriber, writing to stderr. Call once at startup.
pub fn init(level: &str, prefer_level: bool) -> Result<(), AppError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(level, rust_log.as_deref(), prefer_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

/// Parse a bare level name (`error` through `trace`, or `off`).
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    if level.trim().is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| AppError::Logger(format!("unrecognised log level: '{level}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_covers_crate_and_request_spans() {
        assert_eq!(
            directives_for("debug"),
            "warn,recipe_api=debug,tower_http=debug"
        );
        assert_eq!(directives_for("error"), "error,recipe_api=error,tower_http=error");
    }

    #[test]
    fn full_directive_passes_through() {
        let directive = "recipe_api=trace,hyper=info";
        assert_eq!(directives_for(directive), directive);
    }

    #[test]
    fn rust_log_wins_unless_level_is_preferred() {
        assert_eq!(
            candidates("info", Some("hyper=debug"), false),
            vec!["hyper=debug".to_string(), directives_for("info")]
        );
        assert_eq!(
            candidates("info", Some("hyper=debug"), true),
            vec![directives_for("info"), "hyper=debug".to_string()]
        );
    }

    #[test]
    fn blank_rust_log_is_ignored() {
        assert_eq!(candidates("warn", Some("  "), false), vec![directives_for("warn")]);
        assert_eq!(candidates("warn", None, false), vec![directives_for("warn")]);
    }

    #[test]
    fn falls_back_when_first_candidate_is_invalid() {
        assert!(build_filter("info", Some("recipe_api=loud"), false).is_ok());
        assert!(build_filter("recipe_api=loud", Some("info"), true).is_ok());
    }

    #[test]
    fn no_valid_candidate_is_an_error() {
        match build_filter("recipe_api=loud", None, false) {
            Err(AppError::Logger(msg)) => assert!(msg.contains("no usable log filter")),
            other => panic!("expected logger error, got {other:?}"),
        }
    }

    #[test]
    fn parse_level_rejects_unknown() {
        assert_eq!(parse_level("info").unwrap(), LevelFilter::INFO);
        assert!(parse_level("verbose").is_err());
        assert!(parse_level(" ").is_err());
    }
}
