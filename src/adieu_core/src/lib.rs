pub mod domain;
pub mod ports;
pub mod strategies;
pub mod web_context;

// Re-export commonly used types for convenience
pub use domain::{
    client::{Client, Clients, ClientsBuilder},
    logout_outcome::{LogoutOutcome, RedirectAction},
    logout_policy::{LogoutPolicy, LogoutPolicyBuilder},
    profile::{ProfileMap, UserProfile},
};

pub use ports::{
    registry::ClientRegistry,
    session_store::{SessionStore, SessionStoreError},
};

pub use strategies::{
    action_adapter::HttpActionAdapter,
    logout_action_builder::{FnLogoutActionBuilder, LogoutActionBuilder},
};

pub use web_context::{SimpleWebContext, WebContext};

/// Key under which the profile map lives, identically in request and session scope.
pub const USER_PROFILES_KEY: &str = "adieu.user.profiles";

/// Request parameter carrying the requested post-logout redirect target.
pub const URL_PARAMETER: &str = "url";
