//! Lazy, cursor-based filter chain execution.
//!
//! # Responsibilities
//! - Sequence filter invocation strictly in sorted order
//! - Hand each filter a continuation for the rest of the chain
//! - Complete when a filter short-circuits or the cursor passes the end
//!
//! # Design Decisions
//! - A chain value is an immutable shared filter sequence plus a cursor;
//!   advancing builds a new value over the same sequence, never mutating it
//! - `proceed` returns a future that does nothing until polled, so building
//!   a chain of N filters never recurses eagerly through them
//! - Dropping the returned future is cancellation: no further filter runs;
//!   filters release resources through their own scoped acquisition

use std::sync::Arc;

use crate::context::RequestContext;
use crate::filter::{FilterFuture, GatewayFilter};

/// Ordered, immutable filter sequence with a cursor.
#[derive(Clone)]
pub struct FilterChain {
    filters: Arc<[Arc<dyn GatewayFilter>]>,
    index: usize,
}

impl FilterChain {
    pub fn new(filters: Vec<Arc<dyn GatewayFilter>>) -> Self {
        Self::from_shared(filters.into())
    }

    pub(crate) fn from_shared(filters: Arc<[Arc<dyn GatewayFilter>]>) -> Self {
        Self { filters, index: 0 }
    }

    /// Number of filters in the underlying sequence.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Cursor position; filters below it have already been handed control.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Chain value one past this one, over the same sequence. Side-effect
    /// free.
    fn advance(&self) -> FilterChain {
        FilterChain {
            filters: Arc::clone(&self.filters),
            index: self.index + 1,
        }
    }

    /// Execute the rest of the chain, starting at the cursor.
    ///
    /// Lazy: nothing runs until the returned future is polled. At the end of
    /// the sequence it completes with `Ok(())`; a filter's error surfaces
    /// through every caller still awaiting its continuation.
    pub fn proceed<'a>(&self, ctx: &'a mut RequestContext) -> FilterFuture<'a> {
        let chain = self.clone();
        Box::pin(async move {
            match chain.filters.get(chain.index) {
                Some(filter) => {
                    let filter = Arc::clone(filter);
                    let next = chain.advance();
                    filter.invoke(ctx, next).await
                }
                None => Ok(()),
            }
        })
    }
}
