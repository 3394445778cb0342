//! Axum-specific logout route.

use std::sync::Arc;

use adieu_adapters::handlers;
use adieu_application::{Config, UrlPolicy};
use adieu_core::{LogoutPolicy, SessionStore};
use axum::{extract::{Request, State}, response::Response};

use crate::adapters::{AxumActionAdapter, AxumWebContext};

/// Everything the logout route needs, shared across requests.
#[derive(Clone)]
pub struct LogoutState {
    pub config: Arc<Config>,
    pub session_store: Arc<dyn SessionStore>,
    pub policy: Arc<LogoutPolicy>,
    /// `policy`'s patterns, compiled once; `None` when they do not compile, in
    /// which case every request is rejected by the per-call validation
    pub url_policy: Option<Arc<UrlPolicy>>,
    pub session_cookie_name: Arc<str>,
}

impl LogoutState {
    pub fn new(
        config: Config,
        session_store: Arc<dyn SessionStore>,
        policy: LogoutPolicy,
        session_cookie_name: impl Into<Arc<str>>,
    ) -> Self {
        let url_policy = match UrlPolicy::from_policy(&policy) {
            Ok(url_policy) => Some(Arc::new(url_policy)),
            Err(e) => {
                tracing::error!(error = %e, "Invalid logout URL policy");
                None
            }
        };

        Self {
            config: Arc::new(config),
            session_store,
            policy: Arc::new(policy),
            url_policy,
            session_cookie_name: session_cookie_name.into(),
        }
    }
}

/// Axum logout route.
///
/// Mount it for `GET` and `POST`; the requested redirect target is read from
/// the `url` query parameter.
#[tracing::instrument(name = "Logout", skip_all, fields(path = %request.uri().path()))]
pub async fn logout(State(state): State<LogoutState>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let mut context = AxumWebContext::from_parts(&parts, &state.session_cookie_name);

    match &state.url_policy {
        Some(url_policy) => {
            handlers::handle_logout_with_url_policy(
                &mut context,
                state.session_store.clone(),
                &state.config,
                &AxumActionAdapter,
                &state.policy,
                url_policy,
            )
            .await
        }
        None => {
            handlers::handle_logout(
                &mut context,
                state.session_store.clone(),
                &state.config,
                &AxumActionAdapter,
                &state.policy,
            )
            .await
        }
    }
}
