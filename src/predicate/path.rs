//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile pattern strings (`/foo/{id}`, `/files/{*rest}`) at bind time
//! - Match request paths against the compiled patterns in configured order
//! - Extract named template variables on match
//!
//! # Design Decisions
//! - Segment-based matching, no regex in the hot path
//! - Compiled matchers are immutable; matching never takes a lock
//! - Malformed patterns fail at compile time, before any request sees them
//! - First pattern that matches wins; no "best match" search

use std::collections::HashMap;

use thiserror::Error;

use crate::context::RequestContext;
use crate::error::PredicateError;
use crate::predicate::RoutePredicate;

/// Error raised while compiling a path pattern. Configuration-time only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("pattern {0:?} must start with '/'")]
    MissingLeadingSlash(String),

    #[error("malformed capture in segment {0:?}")]
    MalformedCapture(String),

    #[error("invalid capture name in segment {0:?}")]
    InvalidCaptureName(String),

    #[error("rest capture {0:?} must be the final segment")]
    RestCaptureNotLast(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    /// `{name}`: exactly one non-empty path segment.
    Capture(String),
    /// `{*name}`: the remainder of the path, possibly empty.
    Rest(String),
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    raw: String,
    segments: Vec<Segment>,
}

fn valid_capture_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn compile_pattern(pattern: &str) -> Result<CompiledPattern, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }
    let Some(rest) = pattern.strip_prefix('/') else {
        return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
    };

    let mut segments = Vec::new();
    if !rest.is_empty() {
        let raw_segments: Vec<&str> = rest.split('/').collect();
        let last = raw_segments.len() - 1;
        for (i, raw) in raw_segments.iter().enumerate() {
            let segment = if let Some(inner) = raw.strip_prefix('{') {
                let Some(inner) = inner.strip_suffix('}') else {
                    return Err(PatternError::MalformedCapture(raw.to_string()));
                };
                if let Some(name) = inner.strip_prefix('*') {
                    if !valid_capture_name(name) {
                        return Err(PatternError::InvalidCaptureName(raw.to_string()));
                    }
                    if i != last {
                        return Err(PatternError::RestCaptureNotLast(raw.to_string()));
                    }
                    Segment::Rest(name.to_string())
                } else {
                    if !valid_capture_name(inner) {
                        return Err(PatternError::InvalidCaptureName(raw.to_string()));
                    }
                    Segment::Capture(inner.to_string())
                }
            } else if raw.contains('{') || raw.contains('}') {
                return Err(PatternError::MalformedCapture(raw.to_string()));
            } else {
                Segment::Literal(raw.to_string())
            };
            segments.push(segment);
        }
    }

    Ok(CompiledPattern {
        raw: pattern.to_string(),
        segments,
    })
}

fn match_segments(pattern: &[Segment], request: &[&str]) -> Option<HashMap<String, String>> {
    let mut variables = HashMap::new();
    let mut i = 0;
    for segment in pattern {
        match segment {
            Segment::Rest(name) => {
                variables.insert(name.clone(), request[i..].join("/"));
                return Some(variables);
            }
            Segment::Literal(literal) => {
                if request.get(i).copied() != Some(literal.as_str()) {
                    return None;
                }
                i += 1;
            }
            Segment::Capture(name) => {
                let value = *request.get(i)?;
                if value.is_empty() {
                    return None;
                }
                variables.insert(name.clone(), value.to_string());
                i += 1;
            }
        }
    }
    if i == request.len() {
        Some(variables)
    } else {
        None
    }
}

/// Builds an immutable [`CompiledPathMatcher`] for one configuration
/// snapshot. The trailing-separator option is fixed per builder, so no
/// shared mutable compiler state exists.
#[derive(Debug, Clone)]
pub struct PathMatcherBuilder {
    trailing_separator_optional: bool,
}

impl Default for PathMatcherBuilder {
    fn default() -> Self {
        Self {
            trailing_separator_optional: true,
        }
    }
}

impl PathMatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// When enabled (the default), a pattern matches the request path both
    /// with and without one trailing separator.
    pub fn trailing_separator_optional(mut self, optional: bool) -> Self {
        self.trailing_separator_optional = optional;
        self
    }

    /// Compile every pattern eagerly. The configured order is preserved and
    /// decides match precedence.
    pub fn compile<I, S>(self, patterns: I) -> Result<CompiledPathMatcher, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compiled = patterns
            .into_iter()
            .map(|p| compile_pattern(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CompiledPathMatcher {
            patterns: compiled,
            trailing_separator_optional: self.trailing_separator_optional,
        })
    }
}

/// Immutable set of compiled patterns, tried in configured order.
#[derive(Debug, Clone)]
pub struct CompiledPathMatcher {
    patterns: Vec<CompiledPattern>,
    trailing_separator_optional: bool,
}

impl CompiledPathMatcher {
    /// Match a raw request path. Returns the extracted variables of the
    /// first matching pattern, or `None` if no pattern matches.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let stripped = path.strip_prefix('/')?;
        let segments: Vec<&str> = if stripped.is_empty() {
            Vec::new()
        } else {
            stripped.split('/').collect()
        };

        for pattern in &self.patterns {
            if let Some(vars) = match_segments(&pattern.segments, &segments) {
                tracing::trace!(pattern = %pattern.raw, path, "path pattern matched");
                return Some(vars);
            }
            if self.trailing_separator_optional {
                // Tolerate exactly one trailing separator either way.
                let toggled: Option<Vec<&str>> = match segments.last() {
                    Some(&"") => Some(segments[..segments.len() - 1].to_vec()),
                    Some(_) => {
                        let mut with = segments.clone();
                        with.push("");
                        Some(with)
                    }
                    None => None,
                };
                if let Some(toggled) = toggled {
                    if let Some(vars) = match_segments(&pattern.segments, &toggled) {
                        tracing::trace!(pattern = %pattern.raw, path, "path pattern matched");
                        return Some(vars);
                    }
                }
            }
        }
        None
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

/// Route predicate over a compiled path matcher. On match, extracted
/// variables are merged into the request context.
#[derive(Debug, Clone)]
pub struct PathPredicate {
    matcher: CompiledPathMatcher,
}

impl PathPredicate {
    pub fn new(matcher: CompiledPathMatcher) -> Self {
        Self { matcher }
    }
}

impl RoutePredicate for PathPredicate {
    fn test(&self, ctx: &mut RequestContext) -> Result<bool, PredicateError> {
        let path = ctx.path().to_string();
        match self.matcher.matches(&path) {
            Some(variables) => {
                ctx.merge_path_variables(variables);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, Method, Uri};

    fn matcher(patterns: &[&str], trailing: bool) -> CompiledPathMatcher {
        PathMatcherBuilder::new()
            .trailing_separator_optional(trailing)
            .compile(patterns)
            .unwrap()
    }

    #[test]
    fn literal_match() {
        let m = matcher(&["/health"], false);
        assert!(m.matches("/health").is_some());
        assert!(m.matches("/healthz").is_none());
        assert!(m.matches("/health/live").is_none());
    }

    #[test]
    fn capture_extracts_variable() {
        let m = matcher(&["/foo/{id}"], false);
        let vars = m.matches("/foo/123").unwrap();
        assert_eq!(vars["id"], "123");
        assert!(m.matches("/foo").is_none());
        assert!(m.matches("/foo/123/bar").is_none());
    }

    #[test]
    fn capture_rejects_empty_segment() {
        let m = matcher(&["/foo/{id}"], false);
        assert!(m.matches("/foo//").is_none());
    }

    #[test]
    fn trailing_separator_optional_matches_both_forms() {
        let m = matcher(&["/foo/{id}"], true);
        assert_eq!(m.matches("/foo/123").unwrap()["id"], "123");
        assert_eq!(m.matches("/foo/123/").unwrap()["id"], "123");

        let strict = matcher(&["/foo/{id}"], false);
        assert!(strict.matches("/foo/123").is_some());
        assert!(strict.matches("/foo/123/").is_none());
    }

    #[test]
    fn trailing_separator_optional_tolerates_missing_separator() {
        let m = matcher(&["/foo/"], true);
        assert!(m.matches("/foo").is_some());
        assert!(m.matches("/foo/").is_some());
    }

    #[test]
    fn rest_capture_takes_remainder() {
        let m = matcher(&["/files/{*rest}"], false);
        assert_eq!(m.matches("/files/a/b/c").unwrap()["rest"], "a/b/c");
        assert_eq!(m.matches("/files/a").unwrap()["rest"], "a");
        assert_eq!(m.matches("/files/").unwrap()["rest"], "");
        assert!(m.matches("/other").is_none());
    }

    #[test]
    fn first_pattern_wins() {
        let m = matcher(&["/a/{x}", "/a/{y}"], false);
        let vars = m.matches("/a/1").unwrap();
        assert!(vars.contains_key("x"));
        assert!(!vars.contains_key("y"));
    }

    #[test]
    fn root_pattern() {
        let m = matcher(&["/"], false);
        assert!(m.matches("/").is_some());
        assert!(m.matches("/x").is_none());
    }

    #[test]
    fn compile_errors_are_eager() {
        let build = |p: &str| PathMatcherBuilder::new().compile([p]);
        assert_eq!(build("").unwrap_err(), PatternError::Empty);
        assert_eq!(
            build("foo").unwrap_err(),
            PatternError::MissingLeadingSlash("foo".into())
        );
        assert_eq!(
            build("/a/{id").unwrap_err(),
            PatternError::MalformedCapture("{id".into())
        );
        assert_eq!(
            build("/a/{}").unwrap_err(),
            PatternError::InvalidCaptureName("{}".into())
        );
        assert_eq!(
            build("/a/{*rest}/b").unwrap_err(),
            PatternError::RestCaptureNotLast("{*rest}".into())
        );
    }

    #[test]
    fn predicate_merges_variables_only_on_match() {
        let predicate = PathPredicate::new(matcher(&["/foo/{id}"], false));
        let mut ctx = RequestContext::new(
            Method::GET,
            Uri::from_static("/foo/42"),
            HeaderMap::new(),
        );
        assert!(predicate.test(&mut ctx).unwrap());
        assert_eq!(ctx.path_variables()["id"], "42");

        let mut miss = RequestContext::new(
            Method::GET,
            Uri::from_static("/bar"),
            HeaderMap::new(),
        );
        assert!(!predicate.test(&mut miss).unwrap());
        assert!(miss.path_variables().is_empty());
    }
}
