//! Axum-specific route handlers.
//!
//! Routes use Axum's extractors to build the request context, then call the
//! framework-agnostic handlers.

pub mod logout;

pub use logout::{LogoutState, logout};
