/// A redirect produced by the logout flow, either by a client's logout action
/// builder or from the computed post-logout URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectAction {
    location: String,
}

impl RedirectAction {
    /// A `302 Found` redirect to `location`
    pub fn found(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// The single outcome of a logout invocation.
///
/// Every invocation that passes input validation produces exactly one of these,
/// which is handed to an `HttpActionAdapter` for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// 302 with a `Location` header
    Redirect(RedirectAction),

    /// 204 with an empty body
    NoContent,

    /// 400; only used by callers surfacing a configuration failure
    Rejected { reason: String },
}

impl LogoutOutcome {
    pub fn redirect(location: impl Into<String>) -> Self {
        LogoutOutcome::Redirect(RedirectAction::found(location))
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        LogoutOutcome::Rejected {
            reason: reason.into(),
        }
    }

    /// HTTP status code this outcome maps to
    pub fn status_code(&self) -> u16 {
        match self {
            LogoutOutcome::Redirect(_) => 302,
            LogoutOutcome::NoContent => 204,
            LogoutOutcome::Rejected { .. } => 400,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            LogoutOutcome::Redirect(action) => Some(action.location()),
            _ => None,
        }
    }
}

impl From<RedirectAction> for LogoutOutcome {
    fn from(action: RedirectAction) -> Self {
        LogoutOutcome::Redirect(action)
    }
}
