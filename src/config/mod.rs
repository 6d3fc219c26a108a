//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → build_routes (compile predicates eagerly)
//!     → catalog snapshot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a refresh builds a new snapshot
//! - All fields have defaults to allow minimal configs
//! - Every configuration fault (malformed pattern, duplicate id) surfaces
//!   here, before any request uses the faulty configuration

pub mod loader;
pub mod schema;
pub mod validation;

use std::sync::Arc;

use axum::http::Method;

use crate::filter::GatewayFilter;
use crate::predicate::{
    AllOf, HeaderPredicate, HostPredicate, MethodPredicate, PathMatcherBuilder, PathPredicate,
    RoutePredicate,
};
use crate::routing::route::Route;

pub use loader::{load_config, ConfigError};
pub use schema::{GatewayConfig, RouteDefinition};
pub use validation::{validate_config, ValidationError};

/// Compile validated route definitions into runtime routes, with no filters
/// attached.
pub fn build_routes(config: &GatewayConfig) -> Result<Vec<Arc<Route>>, ConfigError> {
    build_routes_with_filters(config, |_| Vec::new())
}

/// Compile validated route definitions into runtime routes, attaching the
/// filters the callback supplies per route id. Filter business logic is the
/// caller's; this layer only wires it in.
pub fn build_routes_with_filters<F>(
    config: &GatewayConfig,
    filters_for: F,
) -> Result<Vec<Arc<Route>>, ConfigError>
where
    F: Fn(&str) -> Vec<Arc<dyn GatewayFilter>>,
{
    validate_config(config).map_err(ConfigError::Validation)?;

    let mut routes = Vec::with_capacity(config.routes.len());
    for definition in &config.routes {
        let predicate = build_predicate(definition)?;
        let mut route = Route::new(definition.id.as_str(), predicate)
            .with_filters(filters_for(&definition.id));
        if let Some(priority) = definition.priority {
            route = route.with_priority(priority);
        }
        routes.push(Arc::new(route));
    }
    Ok(routes)
}

fn build_predicate(
    definition: &RouteDefinition,
) -> Result<Arc<dyn RoutePredicate>, ConfigError> {
    let mut predicates: Vec<Arc<dyn RoutePredicate>> = Vec::new();

    if !definition.paths.is_empty() {
        let matcher = PathMatcherBuilder::new()
            .trailing_separator_optional(definition.trailing_separator_optional)
            .compile(&definition.paths)
            .map_err(|source| {
                ConfigError::Validation(vec![ValidationError::InvalidPattern {
                    route: definition.id.clone(),
                    source,
                }])
            })?;
        predicates.push(Arc::new(PathPredicate::new(matcher)));
    }
    if let Some(host) = &definition.host {
        predicates.push(Arc::new(HostPredicate::new(host.clone())));
    }
    if let Some(method) = &definition.method {
        let method = method.parse::<Method>().map_err(|_| {
            ConfigError::Validation(vec![ValidationError::InvalidMethod {
                route: definition.id.clone(),
                method: method.clone(),
            }])
        })?;
        predicates.push(Arc::new(MethodPredicate::new(method)));
    }
    for header in &definition.headers {
        let predicate = match &header.value {
            Some(value) => HeaderPredicate::with_value(header.name.clone(), value.clone()),
            None => HeaderPredicate::present(header.name.clone()),
        };
        predicates.push(Arc::new(predicate));
    }

    Ok(if predicates.len() == 1 {
        predicates.remove(0)
    } else {
        Arc::new(AllOf::new(predicates))
    })
}
