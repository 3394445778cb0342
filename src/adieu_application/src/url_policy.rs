use adieu_core::LogoutPolicy;
use regex::Regex;

use crate::ConfigurationError;

/// Accepts `/` and paths starting with a single `/`. Protocol-relative
/// references (`//evil.example`) and absolute URLs are refused.
pub const DEFAULT_LOGOUT_URL_PATTERN: &str = r"^(/|/[^/].*)$";

/// Absolute `http`/`https` URL. Identity providers can only send the browser back
/// to an absolute location, so relative targets are withheld from central logout.
pub const DEFAULT_CENTRAL_TARGET_PATTERN: &str = r"^https?://.+$";

/// Compiled redirect-target validation for one logout invocation.
///
/// Patterns must match the whole candidate URL, not a substring of it.
#[derive(Debug, Clone)]
pub struct UrlPolicy {
    logout_url: Regex,
    central_target: Regex,
}

impl UrlPolicy {
    pub fn from_policy(policy: &LogoutPolicy) -> Result<Self, ConfigurationError> {
        let logout_url = compile(
            "logoutUrlPattern",
            policy.logout_url_pattern(),
            DEFAULT_LOGOUT_URL_PATTERN,
        )?;
        let central_target = compile(
            "centralTargetPattern",
            policy.central_target_pattern(),
            DEFAULT_CENTRAL_TARGET_PATTERN,
        )?;

        Ok(Self {
            logout_url,
            central_target,
        })
    }

    /// The requested URL, if it is an acceptable post-logout target
    pub fn target_url<'a>(&self, requested: Option<&'a str>) -> Option<&'a str> {
        requested.filter(|url| self.logout_url.is_match(url))
    }

    /// Narrow a validated target to what may be forwarded to identity providers
    pub fn central_target<'a>(&self, target_url: Option<&'a str>) -> Option<&'a str> {
        target_url.filter(|url| self.central_target.is_match(url))
    }
}

fn compile(
    name: &'static str,
    pattern: Option<&str>,
    default: &str,
) -> Result<Regex, ConfigurationError> {
    let pattern = match pattern {
        Some(pattern) if pattern.trim().is_empty() => {
            return Err(ConfigurationError::BlankPattern(name));
        }
        Some(pattern) => pattern,
        None => default,
    };

    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| ConfigurationError::InvalidPattern {
        name,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_policy() -> UrlPolicy {
        UrlPolicy::from_policy(&LogoutPolicy::default()).unwrap()
    }

    #[test]
    fn test_default_pattern_accepts_relative_paths() {
        let policy = default_policy();

        assert_eq!(policy.target_url(Some("/")), Some("/"));
        assert_eq!(policy.target_url(Some("/tmp/path")), Some("/tmp/path"));
        assert_eq!(policy.target_url(Some("/a?b=c")), Some("/a?b=c"));
    }

    #[test]
    fn test_default_pattern_refuses_other_origins() {
        let policy = default_policy();

        assert_eq!(policy.target_url(Some("//evil.example.com")), None);
        assert_eq!(policy.target_url(Some("https://evil.example.com")), None);
        assert_eq!(policy.target_url(Some("tmp/path")), None);
        assert_eq!(policy.target_url(Some("")), None);
        assert_eq!(policy.target_url(None), None);
    }

    #[test]
    fn test_custom_pattern_must_match_whole_url() {
        let policy =
            UrlPolicy::from_policy(&LogoutPolicy::builder().logout_url_pattern("value").build())
                .unwrap();

        assert_eq!(policy.target_url(Some("value")), Some("value"));
        assert_eq!(policy.target_url(Some("/value/x")), None);
    }

    #[test]
    fn test_central_target_requires_absolute_url() {
        let policy = default_policy();

        assert_eq!(
            policy.central_target(Some("https://app.example.com/bye")),
            Some("https://app.example.com/bye")
        );
        assert_eq!(policy.central_target(Some("/tmp/path")), None);
        assert_eq!(policy.central_target(None), None);
    }

    #[test]
    fn test_blank_pattern_is_rejected() {
        let result = UrlPolicy::from_policy(&LogoutPolicy::builder().logout_url_pattern("  ").build());

        assert_eq!(
            result.unwrap_err().to_string(),
            "logoutUrlPattern cannot be blank"
        );
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = UrlPolicy::from_policy(&LogoutPolicy::builder().logout_url_pattern("(").build());

        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidPattern {
                name: "logoutUrlPattern",
                ..
            })
        ));
    }
}
