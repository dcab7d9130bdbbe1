//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → normalize.rs (decode unreserved escapes, resolve dot segments)
//!     → exclusion.rs (API routes, build assets, images)
//!         excluded → forwarded without classification
//!         otherwise → security::access_control (tier lookup)
//!
//! Matcher Compilation (at startup):
//!     ExclusionConfig / AccessConfig
//!     → Compile matchers (exact, segment prefix, extension)
//!     → Freeze as immutable sets
//! ```
//!
//! # Design Decisions
//! - Matchers compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches the same way

pub mod exclusion;
pub mod matcher;
pub mod normalize;

pub use exclusion::Exclusions;
pub use matcher::{Matcher, PathMatcher};
pub use normalize::normalize_path;
