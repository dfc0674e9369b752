//! # auth-svc-api
//!
//! Wire types for the auth service.
//! The gateway decodes the same types when it validates a session against
//! `GET /auth/session`, so both sides agree on the JSON shape.
//!
//! ## Example
//!
//! ```rust
//! use auth_svc_api::ErrorResponse;
//!
//! let body = ErrorResponse::new("Not authenticated");
//! assert_eq!(body.error, "Not authenticated");
//! ```

pub mod error;
pub mod responses;

// Re-exports for convenient access
pub use error::ErrorResponse;
pub use responses::*;
