//! Diagnostics setup for processes embedding this crate.
//!
//! Dispatch and tenancy emit `tracing` events; the filter built here keeps
//! dependency noise at `warn` while running this crate's own targets at the
//! configured level. `RUST_LOG` always wins when set.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Target prefix for this crate's dispatch/tenancy/readiness events.
const CRATE_TARGET: &str = "repogen_core";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level '{value}' for the repogen_core filter")]
    Level {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

/// Build the filter for this crate's diagnostics: `RUST_LOG` when set,
/// otherwise `warn` globally with the configured level scoped to
/// `repogen_core`.
pub fn filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directives = format!("warn,{CRATE_TARGET}={}", config.log_level);
    EnvFilter::try_new(directives).map_err(|source| TelemetryError::Level {
        value: config.log_level.clone(),
        source,
    })
}

/// Install the process-wide subscriber. Call once during startup, before the
/// first dispatch or tenant resolution.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(config)?)
        .with_target(true)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn config(level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: level.to_string(),
        }
    }

    #[test]
    fn filter_scopes_the_configured_level_to_this_crate() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::remove_var("RUST_LOG");
        let filter = filter(&config("debug")).expect("filter builds");
        let rendered = filter.to_string();
        assert!(
            rendered.contains("repogen_core=debug"),
            "expected crate-scoped directive, got: {rendered}"
        );
        assert!(rendered.contains("warn"), "got: {rendered}");
    }

    #[test]
    fn rust_log_overrides_the_configured_level() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::set_var("RUST_LOG", "trace");
        let filter = filter(&config("info")).expect("filter builds");
        assert_eq!(filter.to_string(), "trace");
        env::remove_var("RUST_LOG");
    }

    #[test]
    fn invalid_level_reports_the_offending_value() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::remove_var("RUST_LOG");
        let err = filter(&config("definitely-not-a-level")).expect_err("level must be rejected");
        assert!(
            matches!(err, TelemetryError::Level { ref value, .. } if value == "definitely-not-a-level")
        );
    }

    #[test]
    fn init_refuses_a_second_subscriber() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::remove_var("RUST_LOG");
        init(&config("info")).expect("first install succeeds");
        let err = init(&config("info")).expect_err("second install must fail");
        assert!(matches!(err, TelemetryError::AlreadyInstalled(_)));
    }
}
