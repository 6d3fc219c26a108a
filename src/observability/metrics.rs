//! Metrics collection.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): dispatches by outcome
//!   (handled / not_found / bypassed)
//! - `gateway_predicate_errors_total` (counter): predicate evaluation
//!   failures absorbed by the resolver, by route
//!
//! # Design Decisions
//! - The crate only records; installing a recorder/exporter is left to the
//!   embedding application

use crate::routing::route::RouteId;

/// Count one completed dispatch by outcome.
pub fn record_dispatch(outcome: &'static str) {
    metrics::counter!("gateway_requests_total", "outcome" => outcome).increment(1);
}

/// Count one absorbed predicate evaluation failure.
pub fn record_predicate_error(route_id: &RouteId) {
    metrics::counter!("gateway_predicate_errors_total", "route" => route_id.to_string())
        .increment(1);
}
