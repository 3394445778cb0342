use async_trait::async_trait;

use crate::{RedirectAction, SessionStore, UserProfile, WebContext};

/// Provider-specific construction of a single-logout redirect.
///
/// Called once per authenticated profile during central logout. Implementations
/// decide how to render an absent `target_url`; returning `None` means the provider
/// has no redirect to offer for this profile.
///
/// # Example
///
/// ```ignore
/// struct EndSession { endpoint: String }
///
/// #[async_trait]
/// impl LogoutActionBuilder for EndSession {
///     async fn logout_action(
///         &self,
///         _context: &dyn WebContext,
///         _session_store: &dyn SessionStore,
///         _profile: &UserProfile,
///         target_url: Option<&str>,
///     ) -> Option<RedirectAction> {
///         let location = match target_url {
///             Some(target) => format!("{}?return_to={}", self.endpoint, target),
///             None => self.endpoint.clone(),
///         };
///         Some(RedirectAction::found(location))
///     }
/// }
/// ```
#[async_trait]
pub trait LogoutActionBuilder: Send + Sync {
    async fn logout_action(
        &self,
        context: &dyn WebContext,
        session_store: &dyn SessionStore,
        profile: &UserProfile,
        target_url: Option<&str>,
    ) -> Option<RedirectAction>;
}

/// Adapts a synchronous function into a `LogoutActionBuilder`.
pub struct FnLogoutActionBuilder<F> {
    builder: F,
}

impl<F> FnLogoutActionBuilder<F>
where
    F: Fn(&dyn WebContext, &dyn SessionStore, &UserProfile, Option<&str>) -> Option<RedirectAction>
        + Send
        + Sync,
{
    pub fn new(builder: F) -> Self {
        Self { builder }
    }
}

#[async_trait]
impl<F> LogoutActionBuilder for FnLogoutActionBuilder<F>
where
    F: Fn(&dyn WebContext, &dyn SessionStore, &UserProfile, Option<&str>) -> Option<RedirectAction>
        + Send
        + Sync,
{
    async fn logout_action(
        &self,
        context: &dyn WebContext,
        session_store: &dyn SessionStore,
        profile: &UserProfile,
        target_url: Option<&str>,
    ) -> Option<RedirectAction> {
        (self.builder)(context, session_store, profile, target_url)
    }
}
