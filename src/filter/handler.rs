//! Merging global and route filters into an executable chain.
//!
//! # Responsibilities
//! - Hold the fixed global filter set, normalized once at startup
//! - Build the sorted combined filter list for a matched route
//! - Cache the sorted merge per route id (route filters are static per
//!   catalog snapshot; `invalidate` clears the cache on refresh)
//! - Append the terminal handler and execute the chain
//!
//! # Design Decisions
//! - The merge copies the global list; the shared original is never mutated
//! - Stable sort ascending by explicit order; unordered filters keep their
//!   concatenation position after every ordered one
//! - Building a chain never executes a filter

use std::sync::Arc;

use dashmap::DashMap;

use crate::context::RequestContext;
use crate::filter::chain::FilterChain;
use crate::filter::{
    FilterFuture, GatewayFilter, GlobalFilter, GlobalFilterAdapter, TerminalAdapter,
    TerminalHandler,
};
use crate::routing::route::{Route, RouteId};

/// Builds and runs the combined filter chain for matched routes.
pub struct FilteringHandler {
    global_filters: Vec<Arc<dyn GatewayFilter>>,
    chain_cache: DashMap<RouteId, Arc<[Arc<dyn GatewayFilter>]>>,
}

impl FilteringHandler {
    /// Construct from already-normalized filters.
    pub fn new(global_filters: Vec<Arc<dyn GatewayFilter>>) -> Self {
        Self {
            global_filters,
            chain_cache: DashMap::new(),
        }
    }

    /// Construct from global filters, adapting each with the order assigned
    /// at registration.
    pub fn from_globals(globals: Vec<(Arc<dyn GlobalFilter>, Option<i32>)>) -> Self {
        let adapted = globals
            .into_iter()
            .map(|(filter, order)| {
                Arc::new(GlobalFilterAdapter::new(filter, order)) as Arc<dyn GatewayFilter>
            })
            .collect();
        Self::new(adapted)
    }

    /// Sorted global + route filter sequence, without the terminal handler.
    fn sorted_filters(&self, route: &Route) -> Arc<[Arc<dyn GatewayFilter>]> {
        if let Some(cached) = self.chain_cache.get(route.id()) {
            return Arc::clone(cached.value());
        }

        let mut combined: Vec<Arc<dyn GatewayFilter>> = self.global_filters.clone();
        combined.extend(route.filters().iter().cloned());
        // Stable: equal and absent orders keep concatenation order.
        combined.sort_by_key(|f| (f.order().is_none(), f.order().unwrap_or(0)));

        tracing::debug!(
            route_id = %route.id(),
            filters = combined.len(),
            "built sorted filter chain"
        );

        let sorted: Arc<[Arc<dyn GatewayFilter>]> = combined.into();
        self.chain_cache
            .insert(route.id().clone(), Arc::clone(&sorted));
        sorted
    }

    /// Build the chain for a route without executing anything.
    pub fn chain_for(&self, route: &Route) -> FilterChain {
        FilterChain::from_shared(self.sorted_filters(route))
    }

    /// Execute the route's chain with the terminal handler appended as the
    /// final element.
    pub fn handle<'a>(
        &self,
        route: &Route,
        ctx: &'a mut RequestContext,
        terminal: Arc<dyn TerminalHandler>,
    ) -> FilterFuture<'a> {
        let mut filters = self.sorted_filters(route).to_vec();
        filters.push(Arc::new(TerminalAdapter(terminal)));
        FilterChain::new(filters).proceed(ctx)
    }

    /// Drop all cached merges, e.g. after a catalog refresh.
    pub fn invalidate(&self) {
        self.chain_cache.clear();
    }

    #[cfg(test)]
    fn cached_routes(&self) -> usize {
        self.chain_cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::OrderedFilter;
    use crate::predicate::{PathMatcherBuilder, PathPredicate};
    use axum::http::{HeaderMap, Method, Uri};
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Named {
        name: &'static str,
        order: Option<i32>,
        log: Log,
    }

    impl GatewayFilter for Named {
        fn invoke<'a>(
            &'a self,
            ctx: &'a mut RequestContext,
            chain: FilterChain,
        ) -> FilterFuture<'a> {
            Box::pin(async move {
                self.log.lock().unwrap().push(self.name.to_string());
                chain.proceed(ctx).await
            })
        }

        fn order(&self) -> Option<i32> {
            self.order
        }
    }

    struct Terminal {
        log: Log,
    }

    impl TerminalHandler for Terminal {
        fn dispatch<'a>(&'a self, _ctx: &'a mut RequestContext) -> FilterFuture<'a> {
            Box::pin(async move {
                self.log.lock().unwrap().push("terminal".to_string());
                Ok(())
            })
        }
    }

    struct NoopGlobal;

    impl GlobalFilter for NoopGlobal {
        fn invoke<'a>(
            &'a self,
            ctx: &'a mut RequestContext,
            chain: FilterChain,
        ) -> FilterFuture<'a> {
            chain.proceed(ctx)
        }
    }

    fn named(name: &'static str, order: Option<i32>, log: &Log) -> Arc<dyn GatewayFilter> {
        Arc::new(Named {
            name,
            order,
            log: log.clone(),
        })
    }

    fn route_with(filters: Vec<Arc<dyn GatewayFilter>>) -> Route {
        let matcher = PathMatcherBuilder::new().compile(["/"]).unwrap();
        Route::new("r1", Arc::new(PathPredicate::new(matcher))).with_filters(filters)
    }

    fn ctx() -> RequestContext {
        RequestContext::new(Method::GET, Uri::from_static("/"), HeaderMap::new())
    }

    #[tokio::test]
    async fn merge_is_sorted_by_order_then_concatenation() {
        let log: Log = Arc::default();
        // Globals: g10 (order 10), g_none (no order).
        // Route: r5 (order 5), r_none (no order).
        let handler = FilteringHandler::new(vec![
            named("g10", Some(10), &log),
            named("g_none", None, &log),
        ]);
        let route = route_with(vec![
            named("r5", Some(5), &log),
            named("r_none", None, &log),
        ]);

        let mut ctx = ctx();
        handler
            .handle(&route, &mut ctx, Arc::new(Terminal { log: log.clone() }))
            .await
            .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["r5", "g10", "g_none", "r_none", "terminal"]
        );
    }

    #[tokio::test]
    async fn equal_orders_preserve_globals_before_route_filters() {
        let log: Log = Arc::default();
        let handler = FilteringHandler::new(vec![named("g", Some(0), &log)]);
        let route = route_with(vec![named("r", Some(0), &log)]);

        let mut ctx = ctx();
        handler
            .handle(&route, &mut ctx, Arc::new(Terminal { log: log.clone() }))
            .await
            .unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["g", "r", "terminal"]);
    }

    #[tokio::test]
    async fn chain_for_builds_without_executing() {
        let log: Log = Arc::default();
        let handler = FilteringHandler::new(vec![named("g", None, &log)]);
        let route = route_with(vec![named("r", None, &log)]);

        let chain = handler.chain_for(&route);
        assert_eq!(chain.len(), 2);
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sorted_merge_is_cached_per_route_and_invalidated() {
        let log: Log = Arc::default();
        let handler = FilteringHandler::new(vec![named("g", None, &log)]);
        let route = route_with(vec![named("r", None, &log)]);

        assert_eq!(handler.cached_routes(), 0);
        let first = handler.sorted_filters(&route);
        assert_eq!(handler.cached_routes(), 1);
        let second = handler.sorted_filters(&route);
        // The cache must hand back the identical sorted sequence, not a
        // fresh rebuild.
        assert!(Arc::ptr_eq(&first, &second));

        handler.invalidate();
        assert_eq!(handler.cached_routes(), 0);
        let rebuilt = handler.sorted_filters(&route);
        assert!(!Arc::ptr_eq(&first, &rebuilt));
    }

    #[tokio::test]
    async fn global_registration_carries_explicit_order() {
        let log: Log = Arc::default();
        let handler = FilteringHandler::from_globals(vec![(
            Arc::new(NoopGlobal) as Arc<dyn GlobalFilter>,
            Some(-1),
        )]);
        let route = route_with(vec![Arc::new(OrderedFilter::new(
            named("r", None, &log),
            3,
        ))]);

        let chain = handler.chain_for(&route);
        assert_eq!(chain.len(), 2);

        let mut ctx = ctx();
        handler
            .handle(&route, &mut ctx, Arc::new(Terminal { log: log.clone() }))
            .await
            .unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["r", "terminal"]);
    }
}
