//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     RouteTable / RouteGroup builders
//!     → table.rs (flatten groups, inherit prefix + middleware)
//!     → pattern.rs (parse, detect duplicates and conflicts)
//!     → Freeze as immutable axum Router
//!
//! Incoming Request (method, path)
//!     → axum Router (literal segments before parameters)
//!     → middleware.rs chain (may short-circuit)
//!     → handler
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: duplicate registrations fail instead of shadowing
//! - Middleware order follows group nesting, outermost first

pub mod middleware;
pub mod pattern;
pub mod table;

pub use middleware::Middleware;
pub use pattern::{PathPattern, PatternError, Segment};
pub use table::{RouteGroup, RouteTable, RoutingError};
