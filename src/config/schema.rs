//! Configuration schema definitions.
//!
//! This module defines the declarative route definitions the gateway core
//! accepts. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Root configuration for the dispatch core.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Route definitions, in declaration order.
    pub routes: Vec<RouteDefinition>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Declarative definition of one route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteDefinition {
    /// Unique route identifier for logging/metrics and chain caching.
    pub id: String,

    /// Catalog priority (lower = tried earlier). Declaration order breaks
    /// ties.
    #[serde(default)]
    pub priority: Option<i32>,

    /// Path patterns, tried in order (e.g. `/api/{version}/users/{id}`).
    #[serde(default)]
    pub paths: Vec<String>,

    /// Whether patterns also match with/without one trailing separator.
    #[serde(default = "default_trailing_separator_optional")]
    pub trailing_separator_optional: bool,

    /// Host to match (exact, case-insensitive).
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP method to match.
    #[serde(default)]
    pub method: Option<String>,

    /// Headers to match; all must be satisfied.
    #[serde(default)]
    pub headers: Vec<HeaderMatch>,
}

fn default_trailing_separator_optional() -> bool {
    true
}

/// One header condition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeaderMatch {
    /// Header name.
    pub name: String,

    /// Exact value to require; `None` means presence is enough.
    #[serde(default)]
    pub value: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit JSON logs instead of the pretty format.
    pub log_json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}
