//! Top-level request dispatch: gate → resolve → filter chain → terminal.
//!
//! # Responsibilities
//! - Apply the pre-resolution bypass gate (e.g. management-port exclusion)
//! - Resolve the route for the request
//! - Execute the combined filter chain with the terminal handler appended
//! - Surface filter failures to the caller untouched
//!
//! # Design Decisions
//! - "No route" is an outcome, not an error; the transport decides the
//!   resulting response
//! - Dropping the dispatch future cancels the request: the chain invokes no
//!   further filter

use std::sync::Arc;

use crate::context::RequestContext;
use crate::error::FilterError;
use crate::filter::{FilteringHandler, TerminalHandler};
use crate::observability::metrics;
use crate::routing::{RouteCatalog, RouteResolver};

/// Pre-resolution gate. When it fires, resolution is skipped entirely.
pub trait BypassGate: Send + Sync {
    fn should_bypass(&self, ctx: &RequestContext) -> bool;
}

/// What dispatch did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A route matched and its chain ran to completion.
    Handled,
    /// No route matched; the caller owns the failure response.
    NotFound,
    /// The bypass gate fired before resolution.
    Bypassed,
}

impl DispatchOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            DispatchOutcome::Handled => "handled",
            DispatchOutcome::NotFound => "not_found",
            DispatchOutcome::Bypassed => "bypassed",
        }
    }
}

/// Wires catalog, resolver, filtering handler, and terminal handler into
/// one entry point per request.
pub struct GatewayDispatcher {
    catalog: Arc<dyn RouteCatalog>,
    resolver: RouteResolver,
    handler: FilteringHandler,
    terminal: Arc<dyn TerminalHandler>,
    bypass: Option<Arc<dyn BypassGate>>,
}

impl GatewayDispatcher {
    pub fn new(
        catalog: Arc<dyn RouteCatalog>,
        handler: FilteringHandler,
        terminal: Arc<dyn TerminalHandler>,
    ) -> Self {
        Self {
            catalog,
            resolver: RouteResolver::new(),
            handler,
            terminal,
            bypass: None,
        }
    }

    pub fn with_bypass_gate(mut self, gate: Arc<dyn BypassGate>) -> Self {
        self.bypass = Some(gate);
        self
    }

    /// Dispatch one request. Filter failures propagate; everything else is
    /// an outcome.
    pub async fn dispatch(&self, ctx: &mut RequestContext) -> Result<DispatchOutcome, FilterError> {
        if let Some(gate) = &self.bypass {
            if gate.should_bypass(ctx) {
                tracing::trace!(request_id = %ctx.request_id(), "request bypassed before resolution");
                return self.finish(DispatchOutcome::Bypassed);
            }
        }

        let Some(route) = self.resolver.resolve(self.catalog.as_ref(), ctx).await else {
            tracing::debug!(
                request_id = %ctx.request_id(),
                method = %ctx.method(),
                path = %ctx.path(),
                "no route found for request"
            );
            return self.finish(DispatchOutcome::NotFound);
        };

        tracing::debug!(
            request_id = %ctx.request_id(),
            route_id = %route.id(),
            "executing filter chain"
        );
        self.handler
            .handle(route.as_ref(), ctx, Arc::clone(&self.terminal))
            .await?;
        self.finish(DispatchOutcome::Handled)
    }

    /// Drop cached per-route chains, e.g. after a catalog refresh.
    pub fn invalidate_chains(&self) {
        self.handler.invalidate();
    }

    fn finish(&self, outcome: DispatchOutcome) -> Result<DispatchOutcome, FilterError> {
        metrics::record_dispatch(outcome.as_str());
        Ok(outcome)
    }
}
