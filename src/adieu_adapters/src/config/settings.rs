use adieu_core::LogoutPolicy;
use config::{Environment, File, FileFormat};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{
    CONFIG_DIR, DEFAULT_SESSION_COOKIE_NAME, DEFAULT_SESSION_TTL_SECS,
    env::{ENV_PREFIX, ENV_SEPARATOR, ENVIRONMENT_ENV_VAR},
    prod,
};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

/// Service settings.
///
/// Layered, later sources winning: `config/base.json`,
/// `config/<ADIEU_ENVIRONMENT>.json`, then `ADIEU_*` environment variables with
/// `__` separating nested keys (`ADIEU_LOGOUT__DEFAULT_URL=/`).
#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    #[serde(default)]
    pub logout: LogoutSettings,
    #[serde(default)]
    pub redis: Option<RedisSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_session_cookie_name")]
    pub session_cookie_name: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
            session_cookie_name: default_session_cookie_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogoutSettings {
    #[serde(default)]
    pub default_url: Option<String>,
    #[serde(default)]
    pub logout_url_pattern: Option<String>,
    #[serde(default)]
    pub central_target_pattern: Option<String>,
    #[serde(default = "default_true")]
    pub local_logout: bool,
    #[serde(default)]
    pub central_logout: bool,
    #[serde(default)]
    pub destroy_session: bool,
}

impl Default for LogoutSettings {
    fn default() -> Self {
        Self {
            default_url: None,
            logout_url_pattern: None,
            central_target_pattern: None,
            local_logout: true,
            central_logout: false,
            destroy_session: false,
        }
    }
}

impl LogoutSettings {
    pub fn to_policy(&self) -> LogoutPolicy {
        let mut builder = LogoutPolicy::builder()
            .local_logout(self.local_logout)
            .central_logout(self.central_logout)
            .destroy_session(self.destroy_session);

        if let Some(url) = &self.default_url {
            builder = builder.default_url(url.clone());
        }
        if let Some(pattern) = &self.logout_url_pattern {
            builder = builder.logout_url_pattern(pattern.clone());
        }
        if let Some(pattern) = &self.central_target_pattern {
            builder = builder.central_target_pattern(pattern.clone());
        }

        builder.build()
    }
}

#[derive(Debug, Deserialize)]
pub struct RedisSettings {
    pub url: Secret<String>,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
}

impl Settings {
    /// Load settings from the config directory and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        let environment =
            std::env::var(ENVIRONMENT_ENV_VAR).unwrap_or_else(|_| "local".to_string());
        tracing::debug!(%environment, "Loading settings");

        let settings = config::Config::builder()
            .add_source(File::with_name(&format!("{CONFIG_DIR}/base")).required(false))
            .add_source(File::with_name(&format!("{CONFIG_DIR}/{environment}")).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load settings from a JSON document only.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings = config::Config::builder()
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn default_address() -> String {
    prod::APP_ADDRESS.to_string()
}

fn default_session_cookie_name() -> String {
    DEFAULT_SESSION_COOKIE_NAME.to_string()
}

fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

fn default_true() -> bool {
    true
}
