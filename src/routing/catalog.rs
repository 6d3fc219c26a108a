//! Route catalog: the ordered, refreshable source of routes.
//!
//! # Design Decisions
//! - `routes()` is a lazy stream so catalogs backed by remote stores can
//!   produce candidates asynchronously
//! - Order is the catalog's contract; the resolver consumes it as produced
//!   and never assumes stability across two resolutions
//! - `StaticCatalog` swaps whole snapshots atomically; readers never lock

use std::collections::HashSet;
use std::sync::Arc;

use arc_swap::ArcSwap;
use futures_util::stream::{self, BoxStream};
use thiserror::Error;

use crate::routing::route::{Route, RouteId};

/// Error building a catalog snapshot. Configuration-time only.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate route id {0:?} in catalog snapshot")]
    DuplicateRouteId(RouteId),
}

/// Source of route candidates for resolution.
pub trait RouteCatalog: Send + Sync {
    /// Produce the catalog's routes, in precedence order.
    fn routes(&self) -> BoxStream<'_, Arc<Route>>;
}

/// In-memory catalog over an atomically swappable snapshot.
///
/// Snapshot order is priority-ascending (routes without a priority last),
/// insertion-stable within equal priorities. An external refresher replaces
/// the snapshot via [`StaticCatalog::replace`]; in-flight resolutions keep
/// iterating the snapshot they started with.
#[derive(Debug)]
pub struct StaticCatalog {
    snapshot: ArcSwap<Vec<Arc<Route>>>,
}

impl StaticCatalog {
    pub fn new(routes: Vec<Arc<Route>>) -> Result<Self, CatalogError> {
        let snapshot = Self::build_snapshot(routes)?;
        Ok(Self {
            snapshot: ArcSwap::from_pointee(snapshot),
        })
    }

    /// Atomically replace the route snapshot.
    pub fn replace(&self, routes: Vec<Arc<Route>>) -> Result<(), CatalogError> {
        let snapshot = Self::build_snapshot(routes)?;
        self.snapshot.store(Arc::new(snapshot));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshot.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.load().is_empty()
    }

    fn build_snapshot(mut routes: Vec<Arc<Route>>) -> Result<Vec<Arc<Route>>, CatalogError> {
        let mut seen = HashSet::new();
        for route in &routes {
            if !seen.insert(route.id().clone()) {
                return Err(CatalogError::DuplicateRouteId(route.id().clone()));
            }
        }
        routes.sort_by_key(|r| (r.priority().is_none(), r.priority().unwrap_or(0)));
        Ok(routes)
    }
}

impl RouteCatalog for StaticCatalog {
    fn routes(&self) -> BoxStream<'_, Arc<Route>> {
        let routes: Vec<Arc<Route>> = self.snapshot.load().iter().cloned().collect();
        Box::pin(stream::iter(routes))
    }
}
