use std::sync::Arc;

use adieu_core::{
    ClientRegistry, HttpActionAdapter, LogoutOutcome, LogoutPolicy, ProfileMap, RedirectAction,
    SessionStore, URL_PARAMETER, WebContext,
};

use crate::{Config, UrlPolicy};

/// Invalid invocation of the logout flow.
///
/// Always raised before any profile or session state is touched.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("config cannot be null")]
    MissingConfig,
    #[error("context cannot be null")]
    MissingContext,
    #[error("httpActionAdapter cannot be null")]
    MissingActionAdapter,
    #[error("{0} cannot be blank")]
    BlankPattern(&'static str),
    #[error("{name} is not a valid pattern: {reason}")]
    InvalidPattern { name: &'static str, reason: String },
}

/// Logout use case - ends the local session and/or triggers single logout at
/// the identity providers, then emits exactly one outcome.
///
/// Holds no state; one value can serve any number of concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoutUseCase;

impl LogoutUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Perform a logout.
    ///
    /// # Arguments
    /// * `context` - The current request
    /// * `session_store` - Session scope backing the profile map
    /// * `config` - Client registry and profile manager factory
    /// * `action_adapter` - Emits the outcome
    /// * `policy` - Default URL, URL patterns and logout flags
    ///
    /// # Returns
    /// Whatever `action_adapter` produced for the outcome, or a
    /// `ConfigurationError` if the invocation itself is invalid.
    ///
    /// Outcome precedence: a central-logout redirect, then a redirect to the
    /// validated `url` parameter or the default URL, then `NoContent`.
    pub async fn perform<C, A>(
        &self,
        context: Option<&mut C>,
        session_store: Arc<dyn SessionStore>,
        config: Option<&Config>,
        action_adapter: Option<&A>,
        policy: &LogoutPolicy,
    ) -> Result<A::Response, ConfigurationError>
    where
        C: WebContext,
        A: HttpActionAdapter,
    {
        let config = config.ok_or(ConfigurationError::MissingConfig)?;
        let context = context.ok_or(ConfigurationError::MissingContext)?;
        let action_adapter = action_adapter.ok_or(ConfigurationError::MissingActionAdapter)?;
        let url_policy = UrlPolicy::from_policy(policy)?;

        Ok(self
            .execute(context, session_store, config, action_adapter, policy, &url_policy)
            .await)
    }

    /// Like [`perform`](Self::perform), with the URL patterns of `policy`
    /// already compiled into `url_policy`, so long-lived callers pay for the
    /// regexes once.
    pub async fn perform_with_url_policy<C, A>(
        &self,
        context: Option<&mut C>,
        session_store: Arc<dyn SessionStore>,
        config: Option<&Config>,
        action_adapter: Option<&A>,
        policy: &LogoutPolicy,
        url_policy: &UrlPolicy,
    ) -> Result<A::Response, ConfigurationError>
    where
        C: WebContext,
        A: HttpActionAdapter,
    {
        let config = config.ok_or(ConfigurationError::MissingConfig)?;
        let context = context.ok_or(ConfigurationError::MissingContext)?;
        let action_adapter = action_adapter.ok_or(ConfigurationError::MissingActionAdapter)?;

        Ok(self
            .execute(context, session_store, config, action_adapter, policy, url_policy)
            .await)
    }

    #[tracing::instrument(
        name = "LogoutUseCase::perform",
        skip_all,
        fields(
            local_logout = policy.local_logout(),
            central_logout = policy.central_logout()
        )
    )]
    async fn execute<C, A>(
        &self,
        context: &mut C,
        session_store: Arc<dyn SessionStore>,
        config: &Config,
        action_adapter: &A,
        policy: &LogoutPolicy,
        url_policy: &UrlPolicy,
    ) -> A::Response
    where
        C: WebContext,
        A: HttpActionAdapter,
    {
        // Compute the post-logout targets
        let target_url = url_policy
            .target_url(context.request_parameter(URL_PARAMETER))
            .map(str::to_owned);
        let effective_url = target_url
            .clone()
            .or_else(|| policy.default_url().map(str::to_owned));

        let manager = config
            .profile_manager_factory()
            .create(session_store.clone());
        let profiles = manager.profiles(&*context).await;
        tracing::debug!(
            path = context.path(),
            profiles = profiles.len(),
            target_url = target_url.as_deref(),
            "Performing logout"
        );

        let central_redirect = if policy.central_logout() {
            self.central_logout(
                &*context,
                session_store.as_ref(),
                config.clients(),
                &profiles,
                url_policy.central_target(target_url.as_deref()),
            )
            .await
        } else {
            None
        };

        // An opt-out of local logout only holds for a single profile
        if policy.local_logout() || profiles.len() > 1 {
            tracing::debug!("Removing profiles");
            manager.remove_profiles(&mut *context).await;

            // Destroying the session is part of local logout; a kept profile
            // must survive in both scopes
            if policy.destroy_session() {
                self.destroy_session(&*context, session_store.as_ref()).await;
            }
        }

        let outcome = match (central_redirect, effective_url) {
            (Some(action), _) => LogoutOutcome::Redirect(action),
            (None, Some(url)) => LogoutOutcome::redirect(url),
            (None, None) => LogoutOutcome::NoContent,
        };
        tracing::debug!(status = outcome.status_code(), location = outcome.location(), "Logout outcome");

        action_adapter.adapt(outcome, &*context)
    }

    /// Ask every client that authenticated a profile for its logout redirect.
    /// All builders run; the first redirect in profile order is kept.
    async fn central_logout(
        &self,
        context: &dyn WebContext,
        session_store: &dyn SessionStore,
        registry: &dyn ClientRegistry,
        profiles: &ProfileMap,
        target_url: Option<&str>,
    ) -> Option<RedirectAction> {
        let mut redirect = None;

        for (name, profile) in profiles.iter() {
            let client_name = profile.client_name().unwrap_or(name);
            let Some(client) = registry.find_client(client_name) else {
                tracing::debug!(client = client_name, "No client registered for profile");
                continue;
            };
            let Some(builder) = client.logout_action_builder() else {
                tracing::debug!(client = client_name, "Client has no logout action builder");
                continue;
            };

            match builder
                .logout_action(context, session_store, profile, target_url)
                .await
            {
                Some(action) if redirect.is_none() => {
                    tracing::debug!(client = client_name, location = action.location(), "Central logout redirect");
                    redirect = Some(action);
                }
                Some(action) => {
                    tracing::debug!(client = client_name, location = action.location(), "Ignoring additional central logout redirect");
                }
                None => {
                    tracing::debug!(client = client_name, "No central logout redirect");
                }
            }
        }

        redirect
    }

    async fn destroy_session(&self, context: &dyn WebContext, session_store: &dyn SessionStore) {
        let Some(session_id) = context.session_id() else {
            return;
        };
        match session_store.destroy_session(session_id).await {
            Ok(destroyed) => tracing::debug!(destroyed, "Session destroyed"),
            Err(e) => tracing::warn!(error = %e, "Failed to destroy session"),
        }
    }
}
