//! Framework-agnostic logout handler.

use std::sync::Arc;

use adieu_application::{Config, ConfigurationError, LogoutUseCase, UrlPolicy};
use adieu_core::{HttpActionAdapter, LogoutOutcome, LogoutPolicy, SessionStore, WebContext};

/// Handle a logout request - framework agnostic.
///
/// Framework routes call this after wrapping their request in a
/// [`WebContext`]. An invalid invocation never reaches the client as an
/// error; it is logged and emitted as a `Rejected` outcome instead.
///
/// # Example
///
/// ```ignore
/// pub async fn logout(State(state): State<LogoutState>, parts: Parts) -> Response {
///     let mut context = AxumWebContext::from_parts(&parts, &state.session_cookie_name);
///     handle_logout(
///         &mut context,
///         state.session_store.clone(),
///         &state.config,
///         &AxumActionAdapter,
///         &state.policy,
///     )
///     .await
/// }
/// ```
pub async fn handle_logout<C, A>(
    context: &mut C,
    session_store: Arc<dyn SessionStore>,
    config: &Config,
    action_adapter: &A,
    policy: &LogoutPolicy,
) -> A::Response
where
    C: WebContext,
    A: HttpActionAdapter,
{
    let result = LogoutUseCase::new()
        .perform(
            Some(&mut *context),
            session_store,
            Some(config),
            Some(action_adapter),
            policy,
        )
        .await;

    into_response(result, context, action_adapter)
}

/// Same as [`handle_logout`], reusing URL patterns compiled once from `policy`.
pub async fn handle_logout_with_url_policy<C, A>(
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
    let result = LogoutUseCase::new()
        .perform_with_url_policy(
            Some(&mut *context),
            session_store,
            Some(config),
            Some(action_adapter),
            policy,
            url_policy,
        )
        .await;

    into_response(result, context, action_adapter)
}

fn into_response<C, A>(
    result: Result<A::Response, ConfigurationError>,
    context: &C,
    action_adapter: &A,
) -> A::Response
where
    C: WebContext,
    A: HttpActionAdapter,
{
    match result {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Logout rejected");
            action_adapter.adapt(LogoutOutcome::rejected(e.to_string()), context)
        }
    }
}
