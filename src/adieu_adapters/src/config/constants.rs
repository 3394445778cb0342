pub mod env {
    pub const ENVIRONMENT_ENV_VAR: &str = "ADIEU_ENVIRONMENT";
    pub const ENV_PREFIX: &str = "ADIEU";
    pub const ENV_SEPARATOR: &str = "__";
}

/// Directory searched for `base.json` and `<environment>.json`
pub const CONFIG_DIR: &str = "config";

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "adieu_session";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60 * 24;

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
