use std::{
    borrow::Cow,
    fmt,
    sync::{Arc, OnceLock},
};

use adieu_core::{ProfileMap, SessionStore, USER_PROFILES_KEY, UserProfile, WebContext};
use serde_json::Value;

/// Where a profile map is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileScope {
    /// Lives as a request attribute for the duration of one request
    Request,
    /// Lives in the session store for the session bound to the request
    Session,
}

/// Facade over the profile map stored in request and session scope.
///
/// Both scopes are addressed by the same key. `save` and `remove_profiles` always
/// touch both scopes, so callers going through this type keep them in lockstep.
///
/// Session-store failures are not fatal here: reads fall back to an empty map and
/// failed writes are logged at `warn`.
#[derive(Clone)]
pub struct ProfileManager {
    session_store: Arc<dyn SessionStore>,
    key: Cow<'static, str>,
    read_from_session: bool,
}

impl ProfileManager {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            session_store,
            key: Cow::Borrowed(USER_PROFILES_KEY),
            read_from_session: true,
        }
    }

    pub fn with_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.key = key.into();
        self
    }

    /// Whether `profiles` also consults the session scope (default `true`)
    pub fn read_from_session(mut self, read_from_session: bool) -> Self {
        self.read_from_session = read_from_session;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.session_store
    }

    pub async fn get<C>(&self, context: &C, scope: ProfileScope) -> ProfileMap
    where
        C: WebContext + ?Sized,
    {
        let value = match scope {
            ProfileScope::Request => context.request_attribute(&self.key).cloned(),
            ProfileScope::Session => {
                let Some(session_id) = context.session_id() else {
                    return ProfileMap::new();
                };
                match self.session_store.get(session_id, &self.key).await {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read profiles from session");
                        None
                    }
                }
            }
        };

        value.map(|v| decode(v, scope)).unwrap_or_default()
    }

    pub async fn set<C>(&self, context: &mut C, scope: ProfileScope, profiles: &ProfileMap)
    where
        C: WebContext + ?Sized,
    {
        let value = match serde_json::to_value(profiles) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, ?scope, "Failed to encode profiles");
                return;
            }
        };

        match scope {
            ProfileScope::Request => context.set_request_attribute(&self.key, value),
            ProfileScope::Session => {
                let Some(session_id) = context.session_id() else {
                    tracing::debug!("No session bound to request, profiles kept in request scope");
                    return;
                };
                if let Err(e) = self.session_store.set(session_id, &self.key, value).await {
                    tracing::warn!(error = %e, "Failed to write profiles to session");
                }
            }
        }
    }

    pub async fn remove<C>(&self, context: &mut C, scope: ProfileScope)
    where
        C: WebContext + ?Sized,
    {
        match scope {
            ProfileScope::Request => context.remove_request_attribute(&self.key),
            ProfileScope::Session => {
                let Some(session_id) = context.session_id() else {
                    return;
                };
                if let Err(e) = self.session_store.remove(session_id, &self.key).await {
                    tracing::warn!(error = %e, "Failed to remove profiles from session");
                }
            }
        }
    }

    /// All profiles for the request: request scope first, then session scope.
    /// A name present in both resolves to the session entry.
    pub async fn profiles<C>(&self, context: &C) -> ProfileMap
    where
        C: WebContext + ?Sized,
    {
        let mut profiles = self.get(context, ProfileScope::Request).await;
        if self.read_from_session {
            profiles.extend(self.get(context, ProfileScope::Session).await);
        }
        profiles
    }

    /// Store `profile` in both scopes, under the name of the client that issued it.
    ///
    /// With `multi_profile` the profile joins the existing ones; otherwise it
    /// replaces them.
    pub async fn save<C>(&self, context: &mut C, profile: UserProfile, multi_profile: bool)
    where
        C: WebContext + ?Sized,
    {
        let mut profiles = if multi_profile {
            self.profiles(&*context).await
        } else {
            ProfileMap::new()
        };

        let name = profile.client_name().unwrap_or("DEFAULT").to_string();
        profiles.insert(name, profile);

        self.set(&mut *context, ProfileScope::Request, &profiles).await;
        self.set(&mut *context, ProfileScope::Session, &profiles).await;
    }

    /// Clear the profile map from both scopes.
    pub async fn remove_profiles<C>(&self, context: &mut C)
    where
        C: WebContext + ?Sized,
    {
        self.remove(&mut *context, ProfileScope::Request).await;
        self.remove(&mut *context, ProfileScope::Session).await;
    }
}

impl fmt::Debug for ProfileManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileManager")
            .field("key", &self.key)
            .field("read_from_session", &self.read_from_session)
            .finish_non_exhaustive()
    }
}

fn decode(value: Value, scope: ProfileScope) -> ProfileMap {
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, ?scope, "Discarding undecodable profile map");
        ProfileMap::new()
    })
}

// ============================================================================
// Factory
// ============================================================================

/// Creates the `ProfileManager` used for one request.
pub trait ProfileManagerFactory: Send + Sync {
    fn create(&self, session_store: Arc<dyn SessionStore>) -> ProfileManager;
}

impl<F> ProfileManagerFactory for F
where
    F: Fn(Arc<dyn SessionStore>) -> ProfileManager + Send + Sync,
{
    fn create(&self, session_store: Arc<dyn SessionStore>) -> ProfileManager {
        self(session_store)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProfileManagerFactory;

impl ProfileManagerFactory for DefaultProfileManagerFactory {
    fn create(&self, session_store: Arc<dyn SessionStore>) -> ProfileManager {
        ProfileManager::new(session_store)
    }
}

static DEFAULT_FACTORY: OnceLock<Arc<dyn ProfileManagerFactory>> = OnceLock::new();

/// Install the process-wide default factory.
///
/// The first call wins; every later call is a no-op and returns `false`.
pub fn set_default_profile_manager_factory(
    name: &str,
    factory: Arc<dyn ProfileManagerFactory>,
) -> bool {
    let installed = DEFAULT_FACTORY.set(factory).is_ok();
    if installed {
        tracing::info!(factory = name, "Default profile manager factory installed");
    } else {
        tracing::debug!(factory = name, "Default profile manager factory already set, ignoring");
    }
    installed
}

pub fn default_profile_manager_factory() -> Option<Arc<dyn ProfileManagerFactory>> {
    DEFAULT_FACTORY.get().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use adieu_core::{SessionStoreError, SimpleWebContext};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct MockSessionStore {
        values: RwLock<HashMap<(String, String), Value>>,
    }

    #[async_trait]
    impl SessionStore for MockSessionStore {
        async fn get(&self, session_id: &str, key: &str) -> Result<Option<Value>, SessionStoreError> {
            let values = self.values.read().await;
            Ok(values.get(&(session_id.to_string(), key.to_string())).cloned())
        }

        async fn set(&self, session_id: &str, key: &str, value: Value) -> Result<(), SessionStoreError> {
            let mut values = self.values.write().await;
            values.insert((session_id.to_string(), key.to_string()), value);
            Ok(())
        }

        async fn remove(&self, session_id: &str, key: &str) -> Result<(), SessionStoreError> {
            let mut values = self.values.write().await;
            values.remove(&(session_id.to_string(), key.to_string()));
            Ok(())
        }

        async fn destroy_session(&self, _session_id: &str) -> Result<bool, SessionStoreError> {
            Ok(false)
        }
    }

    struct FailingSessionStore;

    #[async_trait]
    impl SessionStore for FailingSessionStore {
        async fn get(&self, _: &str, _: &str) -> Result<Option<Value>, SessionStoreError> {
            Err(SessionStoreError::BackendError("down".to_string()))
        }

        async fn set(&self, _: &str, _: &str, _: Value) -> Result<(), SessionStoreError> {
            Err(SessionStoreError::BackendError("down".to_string()))
        }

        async fn remove(&self, _: &str, _: &str) -> Result<(), SessionStoreError> {
            Err(SessionStoreError::BackendError("down".to_string()))
        }

        async fn destroy_session(&self, _: &str) -> Result<bool, SessionStoreError> {
            Err(SessionStoreError::BackendError("down".to_string()))
        }
    }

    fn profile(id: &str, client: &str) -> UserProfile {
        UserProfile::new(id).with_client_name(client)
    }

    #[tokio::test]
    async fn test_save_writes_both_scopes() {
        let manager = ProfileManager::new(Arc::new(MockSessionStore::default()));
        let mut ctx = SimpleWebContext::new().with_session_id("s1");

        manager.save(&mut ctx, profile("1", "github"), false).await;

        let request = manager.get(&ctx, ProfileScope::Request).await;
        let session = manager.get(&ctx, ProfileScope::Session).await;
        assert_eq!(request.len(), 1);
        assert_eq!(request, session);
    }

    #[tokio::test]
    async fn test_save_multi_profile_appends() {
        let manager = ProfileManager::new(Arc::new(MockSessionStore::default()));
        let mut ctx = SimpleWebContext::new().with_session_id("s1");

        manager.save(&mut ctx, profile("1", "github"), true).await;
        manager.save(&mut ctx, profile("2", "google"), true).await;

        let profiles = manager.profiles(&ctx).await;
        assert_eq!(profiles.names().collect::<Vec<_>>(), vec!["github", "google"]);

        manager.save(&mut ctx, profile("3", "gitlab"), false).await;
        assert_eq!(manager.profiles(&ctx).await.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_profiles_clears_both_scopes() {
        let manager = ProfileManager::new(Arc::new(MockSessionStore::default()));
        let mut ctx = SimpleWebContext::new().with_session_id("s1");
        manager.save(&mut ctx, profile("1", "github"), true).await;

        manager.remove_profiles(&mut ctx).await;

        assert!(manager.get(&ctx, ProfileScope::Request).await.is_empty());
        assert!(manager.get(&ctx, ProfileScope::Session).await.is_empty());
    }

    #[tokio::test]
    async fn test_profiles_prefers_session_entry_on_conflict() {
        let store = Arc::new(MockSessionStore::default());
        let manager = ProfileManager::new(store.clone());
        let mut ctx = SimpleWebContext::new().with_session_id("s1");

        let request: ProfileMap = [("github", profile("request", "github"))].into_iter().collect();
        let session: ProfileMap = [
            ("github", profile("session", "github")),
            ("google", profile("2", "google")),
        ]
        .into_iter()
        .collect();
        manager.set(&mut ctx, ProfileScope::Request, &request).await;
        manager.set(&mut ctx, ProfileScope::Session, &session).await;

        let profiles = manager.profiles(&ctx).await;
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles.get("github").map(UserProfile::id), Some("session"));

        let request_only = manager.clone().read_from_session(false);
        assert_eq!(request_only.profiles(&ctx).await.len(), 1);
    }

    #[tokio::test]
    async fn test_no_session_id_means_empty_session_scope() {
        let manager = ProfileManager::new(Arc::new(MockSessionStore::default()));
        let mut ctx = SimpleWebContext::new();

        manager.save(&mut ctx, profile("1", "github"), false).await;

        assert_eq!(manager.get(&ctx, ProfileScope::Request).await.len(), 1);
        assert!(manager.get(&ctx, ProfileScope::Session).await.is_empty());
    }

    #[tokio::test]
    async fn test_backend_failures_degrade_to_empty() {
        let manager = ProfileManager::new(Arc::new(FailingSessionStore));
        let mut ctx = SimpleWebContext::new().with_session_id("s1");

        manager.save(&mut ctx, profile("1", "github"), false).await;

        assert!(manager.get(&ctx, ProfileScope::Session).await.is_empty());
        assert_eq!(manager.profiles(&ctx).await.len(), 1);
    }

    #[tokio::test]
    async fn test_custom_key() {
        let manager = ProfileManager::new(Arc::new(MockSessionStore::default())).with_key("custom");
        let mut ctx = SimpleWebContext::new();

        manager.save(&mut ctx, profile("1", "github"), false).await;

        assert!(ctx.request_attribute("custom").is_some());
        assert!(ctx.request_attribute(USER_PROFILES_KEY).is_none());
    }
}
