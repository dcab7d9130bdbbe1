//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup)
//!     → request.rs (assign request ID)
//!     → middleware/access_control.rs (exclusions, credentials, gateway)
//!         redirect → response.rs (307 to login or home)
//!         allow    → server.rs forward_handler → upstream application
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::{AccessContext, AccessControlState};
pub use request::X_REQUEST_ID;
pub use server::{HttpServer, ServerError};
