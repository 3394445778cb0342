use std::{collections::HashMap, sync::Arc};

use adieu_core::{SessionStore, SessionStoreError};
use dashmap::DashMap;
use serde_json::Value;

/// In-memory session store, one map of values per session.
#[derive(Default, Clone)]
pub struct DashMapSessionStore {
    sessions: Arc<DashMap<String, HashMap<String, Value>>>,
}

impl DashMapSessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Open an empty session and return its identifier
    pub fn create_session(&self) -> String {
        let session_id = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(session_id.clone(), HashMap::new());
        session_id
    }

    pub fn contains_session(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }
}

#[async_trait::async_trait]
impl SessionStore for DashMapSessionStore {
    async fn get(&self, session_id: &str, key: &str) -> Result<Option<Value>, SessionStoreError> {
        Ok(self
            .sessions
            .get(session_id)
            .and_then(|session| session.get(key).cloned()))
    }

    async fn set(&self, session_id: &str, key: &str, value: Value) -> Result<(), SessionStoreError> {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, session_id: &str, key: &str) -> Result<(), SessionStoreError> {
        if let Some(mut session) = self.sessions.get_mut(session_id) {
            session.remove(key);
        }
        Ok(())
    }

    async fn destroy_session(&self, session_id: &str) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.remove(session_id).is_some())
    }
}
