//! Host, method, and header predicates.
//!
//! Same contract as path matching: a boolean test against the request
//! context, no mutation on non-match. None of these extract variables.
//!
//! # Design Decisions
//! - Host matching is case-insensitive (per HTTP spec); a port suffix on the
//!   Host header is ignored
//! - Header matching checks presence, and optionally an exact value

use axum::http::Method;

use crate::context::RequestContext;
use crate::error::PredicateError;
use crate::predicate::RoutePredicate;

/// Matches the Host header, case-insensitively, ignoring any port.
#[derive(Debug, Clone)]
pub struct HostPredicate {
    expected_host: String,
}

impl HostPredicate {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            expected_host: host.into().to_lowercase(),
        }
    }
}

impl RoutePredicate for HostPredicate {
    fn test(&self, ctx: &mut RequestContext) -> Result<bool, PredicateError> {
        let Some(value) = ctx.headers().get("host") else {
            return Ok(false);
        };
        let host = value
            .to_str()
            .map_err(|_| PredicateError::new("host header is not valid UTF-8"))?;
        // A bracketed IPv6 literal without a port has no port to strip.
        let host = if host.ends_with(']') {
            host
        } else {
            host.rsplit_once(':').map_or(host, |(h, _)| h)
        };
        Ok(host.eq_ignore_ascii_case(&self.expected_host))
    }
}

/// Matches the request method exactly.
#[derive(Debug, Clone)]
pub struct MethodPredicate {
    method: Method,
}

impl MethodPredicate {
    pub fn new(method: Method) -> Self {
        Self { method }
    }
}

impl RoutePredicate for MethodPredicate {
    fn test(&self, ctx: &mut RequestContext) -> Result<bool, PredicateError> {
        Ok(ctx.method() == self.method)
    }
}

/// Matches on header presence and, when configured, exact value.
#[derive(Debug, Clone)]
pub struct HeaderPredicate {
    name: String,
    value: Option<String>,
}

impl HeaderPredicate {
    /// Match any request carrying the header.
    pub fn present(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Match only when the header carries exactly this value.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

impl RoutePredicate for HeaderPredicate {
    fn test(&self, ctx: &mut RequestContext) -> Result<bool, PredicateError> {
        let Some(actual) = ctx.headers().get(&self.name) else {
            return Ok(false);
        };
        match &self.value {
            None => Ok(true),
            Some(expected) => {
                let actual = actual.to_str().map_err(|_| {
                    PredicateError::new(format!("header {:?} is not valid UTF-8", self.name))
                })?;
                Ok(actual == expected)
            }
        }
    }
}
