//! Filter subsystem.
//!
//! # Data Flow
//! ```text
//! Global filters (fixed at startup)  ┐
//!                                    ├→ handler.rs (copy, merge, stable sort)
//! Matched route's filters            ┘        │
//!                                             ▼
//!                                    chain.rs (lazy cursor execution)
//!                                             │
//!                                             ▼
//!                                    terminal handler (backend dispatch)
//! ```
//!
//! # Design Decisions
//! - One filter capability; global filters are adapted into it once at
//!   startup rather than special-cased during execution
//! - Order is an explicit optional field set at construction; no runtime
//!   type inspection
//! - Filters without an order sort after every ordered filter, keeping
//!   their concatenation order (globals before route filters)

pub mod chain;
pub mod handler;

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::context::RequestContext;
use crate::error::FilterError;

pub use chain::FilterChain;
pub use handler::FilteringHandler;

/// Completion of one filter invocation (and transitively, of the chain
/// below it).
pub type FilterFuture<'a> = BoxFuture<'a, Result<(), FilterError>>;

/// A composable request-processing step.
///
/// Valid behaviors:
/// - do work, then `chain.proceed(ctx).await`: forward progress;
/// - do work and never invoke the continuation: short-circuit, normally
///   after filling the context's response slot;
/// - return an error: it propagates upward through every filter awaiting
///   its continuation, in reverse call order.
pub trait GatewayFilter: Send + Sync {
    fn invoke<'a>(&'a self, ctx: &'a mut RequestContext, chain: FilterChain) -> FilterFuture<'a>;

    /// Explicit execution order; lower runs first. `None` sorts after all
    /// ordered filters.
    fn order(&self) -> Option<i32> {
        None
    }
}

/// A filter applied to every route. Same invocation contract as
/// [`GatewayFilter`]; adapted into one before composition.
pub trait GlobalFilter: Send + Sync {
    fn invoke<'a>(&'a self, ctx: &'a mut RequestContext, chain: FilterChain) -> FilterFuture<'a>;
}

/// Adapts a [`GlobalFilter`] into the route-filter capability, carrying the
/// order assigned at registration.
pub struct GlobalFilterAdapter {
    delegate: Arc<dyn GlobalFilter>,
    order: Option<i32>,
}

impl GlobalFilterAdapter {
    pub fn new(delegate: Arc<dyn GlobalFilter>, order: Option<i32>) -> Self {
        Self { delegate, order }
    }
}

impl GatewayFilter for GlobalFilterAdapter {
    fn invoke<'a>(&'a self, ctx: &'a mut RequestContext, chain: FilterChain) -> FilterFuture<'a> {
        self.delegate.invoke(ctx, chain)
    }

    fn order(&self) -> Option<i32> {
        self.order
    }
}

/// Wraps any filter with an explicit order without touching the filter
/// itself.
pub struct OrderedFilter {
    delegate: Arc<dyn GatewayFilter>,
    order: i32,
}

impl OrderedFilter {
    pub fn new(delegate: Arc<dyn GatewayFilter>, order: i32) -> Self {
        Self { delegate, order }
    }
}

impl GatewayFilter for OrderedFilter {
    fn invoke<'a>(&'a self, ctx: &'a mut RequestContext, chain: FilterChain) -> FilterFuture<'a> {
        self.delegate.invoke(ctx, chain)
    }

    fn order(&self) -> Option<i32> {
        Some(self.order)
    }
}

/// End-of-chain collaborator performing the actual backend dispatch.
///
/// Appended by the surrounding system as the final chain element; it never
/// receives a continuation worth invoking.
pub trait TerminalHandler: Send + Sync {
    fn dispatch<'a>(&'a self, ctx: &'a mut RequestContext) -> FilterFuture<'a>;
}

pub(crate) struct TerminalAdapter(pub(crate) Arc<dyn TerminalHandler>);

impl GatewayFilter for TerminalAdapter {
    fn invoke<'a>(&'a self, ctx: &'a mut RequestContext, _chain: FilterChain) -> FilterFuture<'a> {
        self.0.dispatch(ctx)
    }
}
