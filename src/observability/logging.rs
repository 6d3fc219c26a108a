//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the logging subsystem once per process
//! - Honor `RUST_LOG` over the configured default level
//!
//! # Design Decisions
//! - JSON format for production, pretty format for development
//! - Re-initialization is a no-op so tests can call this freely

use tracing_subscriber::EnvFilter;

use crate::config::schema::ObservabilityConfig;

/// Install the global tracing subscriber.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if result.is_err() {
        tracing::debug!("logging already initialized, keeping existing subscriber");
    }
}
