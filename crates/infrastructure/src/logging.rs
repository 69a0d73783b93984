//! Global `tracing` subscriber setup.
//!
//! `RUST_LOG`, when set and non-empty, takes precedence over the configured
//! level so verbosity can be raised without touching the config file.

use dnspipe_domain::LoggingConfig;
use tracing_subscriber::EnvFilter;

const FALLBACK_DIRECTIVE: &str = "info";

fn log_spec(config: &LoggingConfig, env_override: Option<String>) -> String {
    match env_override {
        Some(spec) if !spec.trim().is_empty() => spec,
        _ => config.level.to_lowercase(),
    }
}

fn build_filter(spec: &str) -> EnvFilter {
    EnvFilter::try_new(spec).unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE))
}

/// Installs the global subscriber described by `config`.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one is left untouched.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = build_filter(&log_spec(config, std::env::var("RUST_LOG").ok()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.is_json() {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
