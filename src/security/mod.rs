//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Request on a protected group:
//!     → auth.rs (API key present and accepted?)
//!     → 401 JSON error, or pass to the next middleware / handler
//! ```

pub mod auth;

pub use auth::{ApiKeyAuth, KeyValidator, PresenceOnly};
