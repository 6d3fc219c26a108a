//! Route resolution: first matching route wins.
//!
//! # Responsibilities
//! - Consume the catalog in its produced order
//! - Mark the candidate under test in the request context before evaluation
//! - Absorb per-candidate predicate failures (log + metric, treat as
//!   non-match)
//! - Record the matched route in the context and stop at the first match
//!
//! # Design Decisions
//! - Candidates are evaluated strictly one at a time so the under-test
//!   marker mutation is race-free within a request; independent requests
//!   resolve fully in parallel
//! - Exhausting the catalog without a match is an empty result, not an error

use std::sync::Arc;

use futures_util::StreamExt;

use crate::context::RequestContext;
use crate::observability::metrics;
use crate::routing::catalog::RouteCatalog;
use crate::routing::route::Route;

/// Evaluates catalog candidates against one request.
#[derive(Debug, Default, Clone)]
pub struct RouteResolver;

impl RouteResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the first route whose predicate matches the request, or
    /// `None` if no candidate matches.
    pub async fn resolve(
        &self,
        catalog: &dyn RouteCatalog,
        ctx: &mut RequestContext,
    ) -> Option<Arc<Route>> {
        let mut candidates = catalog.routes();
        while let Some(route) = candidates.next().await {
            ctx.set_route_under_test(route.id().clone());
            match route.predicate().test(ctx) {
                Ok(true) => {
                    ctx.clear_route_under_test();
                    ctx.set_matched_route(Arc::clone(&route));
                    tracing::debug!(
                        request_id = %ctx.request_id(),
                        route_id = %route.id(),
                        "route matched"
                    );
                    return Some(route);
                }
                Ok(false) => {
                    tracing::trace!(route_id = %route.id(), "route did not match");
                }
                Err(error) => {
                    // A single faulty predicate must not abort resolution.
                    tracing::error!(
                        request_id = %ctx.request_id(),
                        route_id = %route.id(),
                        %error,
                        "error applying predicate for route; treating as non-match"
                    );
                    metrics::record_predicate_error(route.id());
                }
            }
        }
        ctx.clear_route_under_test();
        tracing::trace!(
            request_id = %ctx.request_id(),
            path = %ctx.path(),
            "no route matched"
        );
        None
    }
}
