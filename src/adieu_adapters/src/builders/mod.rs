//! Provider-specific logout action builders.

pub mod oidc_logout;

pub use oidc_logout::OidcLogoutActionBuilder;
