//! # Adieu - Logout Orchestration Library
//!
//! This is a facade crate that re-exports all public APIs from the adieu components.
//! Use this crate to get access to all logout functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! adieu = { path = "../adieu" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `UserProfile`, `ProfileMap`, `Client`, `LogoutOutcome`, etc.
//! - **Ports**: `SessionStore`, `ClientRegistry`, `WebContext`, `HttpActionAdapter`
//! - **Use cases**: `LogoutUseCase`, plus `ProfileManager` and `Config`
//! - **Adapters**: `DashMapSessionStore`, `RedisSessionStore`, `OidcLogoutActionBuilder`
//! - **Service**: `LogoutService` - standalone or nested axum router

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use adieu_core::*;
}

pub use adieu_core::{
    Client, Clients, ClientsBuilder, LogoutOutcome, LogoutPolicy, LogoutPolicyBuilder,
    ProfileMap, RedirectAction, URL_PARAMETER, USER_PROFILES_KEY, UserProfile,
};

// ============================================================================
// Ports and Strategies
// ============================================================================

pub use adieu_core::{
    ClientRegistry, FnLogoutActionBuilder, HttpActionAdapter, LogoutActionBuilder, SessionStore,
    SessionStoreError, SimpleWebContext, WebContext,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use adieu_application::*;
}

pub use adieu_application::{
    Config, ConfigBuilder, ConfigurationError, LogoutUseCase, ProfileManager,
    ProfileManagerFactory, ProfileScope,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Framework-agnostic handlers
    pub mod handlers {
        pub use adieu_adapters::handlers::*;
    }

    /// Session store implementations
    pub mod persistence {
        pub use adieu_adapters::persistence::*;
    }

    /// Central logout action builders
    pub mod builders {
        pub use adieu_adapters::builders::*;
    }

    /// Configuration
    pub mod config {
        pub use adieu_adapters::config::*;
    }

    /// Axum integration
    pub mod axum {
        pub use adieu_axum::*;
    }
}

pub use adieu_adapters::{
    builders::OidcLogoutActionBuilder,
    handlers::handle_logout,
    persistence::{DashMapSessionStore, RedisSessionStore},
};

// ============================================================================
// Logout Service (Main Entry Point)
// ============================================================================

pub use adieu_service::{LogoutService, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing session stores and logout builders
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
