//! Route model: one configuration unit pairing a predicate with filters.

use std::fmt;
use std::sync::Arc;

use crate::filter::GatewayFilter;
use crate::predicate::RoutePredicate;

/// Unique route identifier within one catalog snapshot.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RouteId(Arc<str>);

impl RouteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({:?})", &*self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for RouteId {
    fn from(value: String) -> Self {
        Self(Arc::from(value.as_str()))
    }
}

/// A route: identity, predicate, route-scoped filters, optional priority.
///
/// Immutable once constructed; a catalog refresh builds new values rather
/// than mutating existing ones.
pub struct Route {
    id: RouteId,
    predicate: Arc<dyn RoutePredicate>,
    filters: Vec<Arc<dyn GatewayFilter>>,
    priority: Option<i32>,
}

impl Route {
    pub fn new(id: impl Into<RouteId>, predicate: Arc<dyn RoutePredicate>) -> Self {
        Self {
            id: id.into(),
            predicate,
            filters: Vec::new(),
            priority: None,
        }
    }

    /// Append a route-scoped filter. Relative order of appends is preserved
    /// among filters without an explicit order.
    pub fn with_filter(mut self, filter: Arc<dyn GatewayFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_filters(mut self, filters: Vec<Arc<dyn GatewayFilter>>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Catalog-level priority; lower values are tried earlier by catalogs
    /// that honor it. Not consulted by the resolver itself.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn id(&self) -> &RouteId {
        &self.id
    }

    pub fn predicate(&self) -> &Arc<dyn RoutePredicate> {
        &self.predicate
    }

    pub fn filters(&self) -> &[Arc<dyn GatewayFilter>] {
        &self.filters
    }

    pub fn priority(&self) -> Option<i32> {
        self.priority
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("id", &self.id)
            .field("predicate", &self.predicate)
            .field("filters", &self.filters.len())
            .field("priority", &self.priority)
            .finish()
    }
}
