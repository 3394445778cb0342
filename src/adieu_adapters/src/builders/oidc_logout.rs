use adieu_core::{LogoutActionBuilder, RedirectAction, SessionStore, UserProfile, WebContext};
use url::Url;

/// OpenID Connect RP-initiated logout.
///
/// Redirects the browser to the provider's `end_session_endpoint` with the
/// profile's ID token as `id_token_hint` and, when present, the target URL as
/// `post_logout_redirect_uri`. Profiles without an ID token yield no redirect.
#[derive(Debug, Clone)]
pub struct OidcLogoutActionBuilder {
    end_session_endpoint: Url,
    client_id: Option<String>,
}

impl OidcLogoutActionBuilder {
    pub fn new(end_session_endpoint: Url) -> Self {
        Self {
            end_session_endpoint,
            client_id: None,
        }
    }

    /// Also send `client_id`, which some providers require
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    fn end_session_url(&self, id_token: &str, target_url: Option<&str>) -> Url {
        let mut url = self.end_session_endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("id_token_hint", id_token);
            if let Some(target_url) = target_url {
                query.append_pair("post_logout_redirect_uri", target_url);
            }
            if let Some(client_id) = &self.client_id {
                query.append_pair("client_id", client_id);
            }
        }
        url
    }
}

#[async_trait::async_trait]
impl LogoutActionBuilder for OidcLogoutActionBuilder {
    async fn logout_action(
        &self,
        _context: &dyn WebContext,
        _session_store: &dyn SessionStore,
        profile: &UserProfile,
        target_url: Option<&str>,
    ) -> Option<RedirectAction> {
        let Some(id_token) = profile.id_token() else {
            tracing::debug!(profile = profile.id(), "No ID token, skipping RP-initiated logout");
            return None;
        };

        let url = self.end_session_url(id_token, target_url);
        Some(RedirectAction::found(url.as_str()))
    }
}
