//! Edge gateway request-dispatch core.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────┐
//!                 │                  DISPATCH CORE                        │
//!                 │                                                       │
//!  RequestContext │  ┌──────────┐    ┌───────────┐    ┌───────────────┐  │
//!  ───────────────┼─▶│  bypass  │───▶│  routing  │───▶│    filter     │  │
//!                 │  │   gate   │    │ resolver  │    │ chain (sorted)│  │
//!                 │  └──────────┘    └─────┬─────┘    └───────┬───────┘  │
//!                 │                        │                  │          │
//!                 │                  ┌─────▼─────┐    ┌───────▼───────┐  │
//!                 │                  │ predicate │    │   terminal    │──┼──▶ backend
//!                 │                  │ evaluator │    │   handler     │  │    dispatch
//!                 │                  └───────────┘    └───────────────┘  │
//!                 │                                                       │
//!                 │  ┌────────────────────────────────────────────────┐  │
//!                 │  │      config  ·  observability  ·  errors       │  │
//!                 │  └────────────────────────────────────────────────┘  │
//!                 └──────────────────────────────────────────────────────┘
//! ```
//!
//! Given an inbound request and a catalog of routes, the core resolves the
//! first route whose predicate matches and executes a deterministically
//! ordered chain of filters (the fixed global set merged with the route's
//! own) before the request reaches its backend target. Transport, route
//! storage, and concrete filter business logic are external collaborators.

// Core pipeline
pub mod context;
pub mod dispatch;
pub mod filter;
pub mod predicate;
pub mod routing;

// Cross-cutting
pub mod config;
pub mod error;
pub mod observability;

pub use context::RequestContext;
pub use dispatch::{BypassGate, DispatchOutcome, GatewayDispatcher};
pub use error::{FilterError, PredicateError};
pub use filter::{FilterChain, FilteringHandler, GatewayFilter, GlobalFilter, TerminalHandler};
pub use predicate::RoutePredicate;
pub use routing::{Route, RouteCatalog, RouteId, RouteResolver, StaticCatalog};
