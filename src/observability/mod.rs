//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver and dispatcher produce:
//!     → logging.rs (structured log events, request-id correlated)
//!     → metrics.rs (dispatch outcomes, absorbed predicate errors)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; JSON or pretty per config
//! - Metric updates are cheap counter increments; a recorder/exporter is
//!   the embedding application's concern

pub mod logging;
pub mod metrics;
