//! Request-time error taxonomy.
//!
//! # Design Decisions
//! - Predicate failures are absorbed per candidate by the resolver; they
//!   carry a message, not a response
//! - Filter failures are never absorbed; they propagate to the dispatcher's
//!   caller, which owns the failure response
//! - Configuration-time errors live with the config module (raised eagerly,
//!   before any request can observe them)

use thiserror::Error;

/// Failure while evaluating a single route predicate.
///
/// The resolver logs this and treats the candidate as a non-match; it never
/// aborts resolution for the request.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PredicateError {
    message: String,
}

impl PredicateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure raised inside the filter chain.
///
/// Propagates upward through every filter still awaiting its continuation,
/// in reverse call order, and then to the dispatcher's caller.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A filter (or the terminal handler) failed to complete.
    #[error("filter failed: {0}")]
    Failed(Box<dyn std::error::Error + Send + Sync>),

    /// The request was aborted before the chain completed.
    #[error("request cancelled before the chain completed")]
    Cancelled,
}

impl FilterError {
    /// Build a `Failed` variant from any error or message.
    pub fn failed(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        FilterError::Failed(source.into())
    }
}
