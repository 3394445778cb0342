pub mod config;
pub mod profile_manager;
pub mod url_policy;
pub mod use_cases;

pub use config::{Config, ConfigBuilder};
pub use profile_manager::{
    DefaultProfileManagerFactory, ProfileManager, ProfileManagerFactory, ProfileScope,
    default_profile_manager_factory, set_default_profile_manager_factory,
};
pub use url_policy::{DEFAULT_CENTRAL_TARGET_PATTERN, DEFAULT_LOGOUT_URL_PATTERN, UrlPolicy};
pub use use_cases::logout::{ConfigurationError, LogoutUseCase};
