//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (RequestContext)
//!     → catalog.rs (lazy, ordered stream of routes)
//!     → resolver.rs (evaluate predicates one at a time)
//!     → Return: first matching Route, or no match
//!
//! Route compilation (at bind time):
//!     RouteDefinition[]
//!     → compile predicates (path patterns, host, method, header)
//!     → Freeze as immutable Route values in a catalog snapshot
//! ```
//!
//! # Design Decisions
//! - Routes are immutable per catalog snapshot; refresh swaps the snapshot
//! - Catalog iteration order decides precedence; first match wins
//! - A predicate failure is logged and treated as a non-match, never as a
//!   resolution failure

pub mod catalog;
pub mod resolver;
pub mod route;

pub use catalog::{CatalogError, RouteCatalog, StaticCatalog};
pub use resolver::RouteResolver;
pub use route::{Route, RouteId};
