//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway and forwarding path produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (decision counters, upstream latency)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every trace span
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
