//! Axum integration for the Adieu logout library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  adieu_core: WebContext, HttpActionAdapter│
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  adieu_axum: Axum implementations        │
//! │  - AxumWebContext                        │
//! │  - AxumActionAdapter                     │
//! │  - logout route                          │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use adieu_axum::{LogoutState, routes};
//!
//! let app = Router::new()
//!     .route("/logout", get(routes::logout).post(routes::logout))
//!     .with_state(logout_state);
//! ```

pub mod adapters;
pub mod routes;

pub use adapters::{AxumActionAdapter, AxumWebContext};
pub use routes::{LogoutState, logout};
