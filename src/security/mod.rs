//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (not excluded):
//!     → credentials.rs (token + role cookies)
//!     → access_control.rs (classify path, decide)
//!     → Allow / RedirectToLogin / RedirectToHome
//! ```
//!
//! # Design Decisions
//! - Fail closed: missing or unrecognized credentials count as absent
//! - Default deny: paths not listed as public need a credential
//! - No trust decisions beyond what the cookies assert (no token verification)

pub mod access_control;
pub mod credentials;

pub use access_control::{Decision, Gateway, Role, Tier, TierTable};
pub use credentials::Credentials;
