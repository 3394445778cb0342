/// Per-invocation logout parameters.
///
/// Built with [`LogoutPolicy::builder`]; every field is optional and falls back to
/// the documented default:
///
/// | field | default |
/// |---|---|
/// | `default_url` | none |
/// | `logout_url_pattern` | same-origin relative path |
/// | `central_target_pattern` | absolute `http(s)` URL |
/// | `local_logout` | `true` |
/// | `central_logout` | `false` |
/// | `destroy_session` | `false` |
///
/// Patterns are stored as given and validated when a logout is performed, so that
/// a blank or malformed pattern is reported as a configuration error at that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutPolicy {
    default_url: Option<String>,
    logout_url_pattern: Option<String>,
    central_target_pattern: Option<String>,
    local_logout: bool,
    central_logout: bool,
    destroy_session: bool,
}

impl Default for LogoutPolicy {
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

impl LogoutPolicy {
    pub fn builder() -> LogoutPolicyBuilder {
        LogoutPolicyBuilder::default()
    }

    /// Fallback redirect used when no valid `url` parameter was supplied
    pub fn default_url(&self) -> Option<&str> {
        self.default_url.as_deref()
    }

    /// Pattern the requested `url` parameter must match as a whole
    pub fn logout_url_pattern(&self) -> Option<&str> {
        self.logout_url_pattern.as_deref()
    }

    /// Pattern a validated target must also match before it is handed to
    /// central-logout builders
    pub fn central_target_pattern(&self) -> Option<&str> {
        self.central_target_pattern.as_deref()
    }

    pub fn local_logout(&self) -> bool {
        self.local_logout
    }

    pub fn central_logout(&self) -> bool {
        self.central_logout
    }

    pub fn destroy_session(&self) -> bool {
        self.destroy_session
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogoutPolicyBuilder {
    policy: LogoutPolicy,
}

impl LogoutPolicyBuilder {
    pub fn default_url(mut self, url: impl Into<String>) -> Self {
        self.policy.default_url = Some(url.into());
        self
    }

    pub fn logout_url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.policy.logout_url_pattern = Some(pattern.into());
        self
    }

    pub fn central_target_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.policy.central_target_pattern = Some(pattern.into());
        self
    }

    pub fn local_logout(mut self, local_logout: bool) -> Self {
        self.policy.local_logout = local_logout;
        self
    }

    pub fn central_logout(mut self, central_logout: bool) -> Self {
        self.policy.central_logout = central_logout;
        self
    }

    pub fn destroy_session(mut self, destroy_session: bool) -> Self {
        self.policy.destroy_session = destroy_session;
        self
    }

    pub fn build(self) -> LogoutPolicy {
        self.policy
    }
}
