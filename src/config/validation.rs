//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Detect duplicate route ids and routes with no predicate at all
//! - Compile every path pattern so malformed ones fail before first use
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use axum::http::Method;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::predicate::{PathMatcherBuilder, PatternError};

/// One semantic fault in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("duplicate route id {0:?}")]
    DuplicateRouteId(String),

    #[error("route {0:?} declares no predicate (path, host, method, or header)")]
    NoPredicates(String),

    #[error("route {route:?} has an invalid path pattern: {source}")]
    InvalidPattern {
        route: String,
        source: PatternError,
    },

    #[error("route {route:?} has an invalid method {method:?}")]
    InvalidMethod { route: String, method: String },

    #[error("route {0:?} declares a header match with an empty name")]
    EmptyHeaderName(String),
}

/// Validate a configuration, collecting every fault.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for route in &config.routes {
        if !seen_ids.insert(route.id.as_str()) {
            errors.push(ValidationError::DuplicateRouteId(route.id.clone()));
        }

        let has_predicate = !route.paths.is_empty()
            || route.host.is_some()
            || route.method.is_some()
            || !route.headers.is_empty();
        if !has_predicate {
            errors.push(ValidationError::NoPredicates(route.id.clone()));
        }

        if !route.paths.is_empty() {
            if let Err(source) = PathMatcherBuilder::new()
                .trailing_separator_optional(route.trailing_separator_optional)
                .compile(&route.paths)
            {
                errors.push(ValidationError::InvalidPattern {
                    route: route.id.clone(),
                    source,
                });
            }
        }

        if let Some(method) = &route.method {
            if method.parse::<Method>().is_err() {
                errors.push(ValidationError::InvalidMethod {
                    route: route.id.clone(),
                    method: method.clone(),
                });
            }
        }

        for header in &route.headers {
            if header.name.is_empty() {
                errors.push(ValidationError::EmptyHeaderName(route.id.clone()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
