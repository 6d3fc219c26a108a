//! Predicate evaluation subsystem.
//!
//! # Data Flow
//! ```text
//! Declarative match config (patterns, host, method, headers)
//!     → compiled once into reusable predicates (at bind time)
//!     → tested per request by the route resolver
//!     → On match: extracted variables merged into RequestContext
//! ```
//!
//! # Design Decisions
//! - Predicates are fallible: `Result<bool, PredicateError>` instead of
//!   panicking; the resolver absorbs errors per candidate
//! - A successful match may mutate the context (path variable extraction);
//!   a non-match must leave it untouched
//! - Compilation happens once per configuration snapshot, never per request

pub mod path;
pub mod request;

use std::fmt;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::error::PredicateError;

pub use path::{CompiledPathMatcher, PathMatcherBuilder, PathPredicate, PatternError};
pub use request::{HeaderPredicate, HostPredicate, MethodPredicate};

/// Boolean test of a request, possibly extracting variables on match.
pub trait RoutePredicate: Send + Sync + fmt::Debug {
    /// Test the request. May mutate the context only on a successful match.
    fn test(&self, ctx: &mut RequestContext) -> Result<bool, PredicateError>;
}

/// Matches when every inner predicate matches (AND).
#[derive(Debug)]
pub struct AllOf {
    predicates: Vec<Arc<dyn RoutePredicate>>,
}

impl AllOf {
    pub fn new(predicates: Vec<Arc<dyn RoutePredicate>>) -> Self {
        Self { predicates }
    }
}

impl RoutePredicate for AllOf {
    fn test(&self, ctx: &mut RequestContext) -> Result<bool, PredicateError> {
        for predicate in &self.predicates {
            if !predicate.test(ctx)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Matches when any inner predicate matches (OR).
#[derive(Debug)]
pub struct AnyOf {
    predicates: Vec<Arc<dyn RoutePredicate>>,
}

impl AnyOf {
    pub fn new(predicates: Vec<Arc<dyn RoutePredicate>>) -> Self {
        Self { predicates }
    }
}

impl RoutePredicate for AnyOf {
    fn test(&self, ctx: &mut RequestContext) -> Result<bool, PredicateError> {
        for predicate in &self.predicates {
            if predicate.test(ctx)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Inverts an inner predicate.
#[derive(Debug)]
pub struct Not {
    inner: Arc<dyn RoutePredicate>,
}

impl Not {
    pub fn new(inner: Arc<dyn RoutePredicate>) -> Self {
        Self { inner }
    }
}

impl RoutePredicate for Not {
    fn test(&self, ctx: &mut RequestContext) -> Result<bool, PredicateError> {
        Ok(!self.inner.test(ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, Method, Uri};

    #[derive(Debug)]
    struct Fixed(bool);

    impl RoutePredicate for Fixed {
        fn test(&self, _ctx: &mut RequestContext) -> Result<bool, PredicateError> {
            Ok(self.0)
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl RoutePredicate for Failing {
        fn test(&self, _ctx: &mut RequestContext) -> Result<bool, PredicateError> {
            Err(PredicateError::new("boom"))
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::new(Method::GET, Uri::from_static("/"), HeaderMap::new())
    }

    #[test]
    fn all_of_requires_every_branch() {
        let mut ctx = ctx();
        let p = AllOf::new(vec![Arc::new(Fixed(true)), Arc::new(Fixed(true))]);
        assert!(p.test(&mut ctx).unwrap());
        let p = AllOf::new(vec![Arc::new(Fixed(true)), Arc::new(Fixed(false))]);
        assert!(!p.test(&mut ctx).unwrap());
    }

    #[test]
    fn any_of_short_circuits_before_failure() {
        let mut ctx = ctx();
        let p = AnyOf::new(vec![Arc::new(Fixed(true)), Arc::new(Failing)]);
        assert!(p.test(&mut ctx).unwrap());
    }

    #[test]
    fn composite_propagates_branch_failure() {
        let mut ctx = ctx();
        let p = AllOf::new(vec![Arc::new(Failing), Arc::new(Fixed(true))]);
        assert!(p.test(&mut ctx).is_err());
    }

    #[test]
    fn not_inverts() {
        let mut ctx = ctx();
        assert!(Not::new(Arc::new(Fixed(false))).test(&mut ctx).unwrap());
        assert!(!Not::new(Arc::new(Fixed(true))).test(&mut ctx).unwrap());
    }
}
