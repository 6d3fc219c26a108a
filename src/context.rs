//! Per-request context shared across resolution and filtering.
//!
//! # Responsibilities
//! - Carry the routing-relevant request data (method, URI, headers)
//! - Generate a unique request ID as early as possible for tracing
//! - Hold the typed per-request signals the components exchange
//!
//! # Design Decisions
//! - Typed named fields instead of a string-keyed attribute bag; each field
//!   is written by exactly one component:
//!   - `route_under_test` / `matched_route`: the route resolver
//!   - `path_variables`: the path predicate (merged, never replaced)
//!   - `response`: a short-circuiting filter or the terminal handler
//! - Created fresh per inbound request, never reused across requests

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Response, Uri};
use uuid::Uuid;

use crate::routing::route::{Route, RouteId};

/// Mutable request-scoped state threaded through the dispatch pipeline.
pub struct RequestContext {
    request_id: Uuid,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    route_under_test: Option<RouteId>,
    matched_route: Option<Arc<Route>>,
    path_variables: HashMap<String, String>,
    response: Option<Response<Body>>,
}

impl RequestContext {
    /// Create a context for one inbound request.
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            method,
            uri,
            headers,
            route_under_test: None,
            matched_route: None,
            path_variables: HashMap::new(),
            response: None,
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Raw request path, the input to path predicates.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Id of the route whose predicate is currently being evaluated, if any.
    ///
    /// Present only while the resolver is testing a candidate; cleared on
    /// match and on exhaustion.
    pub fn route_under_test(&self) -> Option<&RouteId> {
        self.route_under_test.as_ref()
    }

    pub(crate) fn set_route_under_test(&mut self, id: RouteId) {
        self.route_under_test = Some(id);
    }

    pub(crate) fn clear_route_under_test(&mut self) {
        self.route_under_test = None;
    }

    /// The route resolution settled on, set at most once per request.
    pub fn matched_route(&self) -> Option<&Arc<Route>> {
        self.matched_route.as_ref()
    }

    pub(crate) fn set_matched_route(&mut self, route: Arc<Route>) {
        self.matched_route = Some(route);
    }

    /// Variables extracted by path predicates, e.g. `{id}` captures.
    pub fn path_variables(&self) -> &HashMap<String, String> {
        &self.path_variables
    }

    /// Merge newly extracted variables into the context. Existing keys are
    /// overwritten; unrelated keys survive.
    pub fn merge_path_variables(&mut self, variables: HashMap<String, String>) {
        self.path_variables.extend(variables);
    }

    /// Response produced so far, if any. A filter that fills this slot and
    /// does not invoke its continuation short-circuits the chain.
    pub fn response(&self) -> Option<&Response<Body>> {
        self.response.as_ref()
    }

    pub fn set_response(&mut self, response: Response<Body>) {
        self.response = Some(response);
    }

    /// Hand the response to the transport once the chain completes.
    pub fn take_response(&mut self) -> Option<Response<Body>> {
        self.response.take()
    }
}
