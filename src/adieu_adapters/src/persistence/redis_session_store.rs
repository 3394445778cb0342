use std::sync::Arc;

use adieu_core::{SessionStore, SessionStoreError};
use redis::{Commands, Connection};
use serde_json::Value;
use tokio::sync::RwLock;

/// Session store backed by one Redis hash per session.
///
/// Values are stored JSON-encoded; every write refreshes the session TTL.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: Arc<RwLock<Connection>>,
    session_ttl: u64,
}

impl RedisSessionStore {
    pub fn new(conn: Arc<RwLock<Connection>>, session_ttl: u64) -> Self {
        Self { conn, session_ttl }
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, session_id: &str, key: &str) -> Result<Option<Value>, SessionStoreError> {
        let session_key = get_key(session_id);

        let mut conn = self.conn.write().await;
        let raw: Option<String> = conn
            .hget(&session_key, key)
            .map_err(|e| SessionStoreError::BackendError(e.to_string()))?;

        raw.map(|raw| {
            serde_json::from_str(&raw)
                .map_err(|e| SessionStoreError::SerializationError(e.to_string()))
        })
        .transpose()
    }

    async fn set(&self, session_id: &str, key: &str, value: Value) -> Result<(), SessionStoreError> {
        let session_key = get_key(session_id);
        let payload = serde_json::to_string(&value)
            .map_err(|e| SessionStoreError::SerializationError(e.to_string()))?;

        let mut conn = self.conn.write().await;
        let _: () = set_pipeline(&session_key, key, &payload, self.session_ttl)
            .query(&mut *conn)
            .map_err(|e| SessionStoreError::BackendError(e.to_string()))?;
        Ok(())
    }

    async fn remove(&self, session_id: &str, key: &str) -> Result<(), SessionStoreError> {
        let session_key = get_key(session_id);

        let mut conn = self.conn.write().await;
        let _: () = conn
            .hdel(&session_key, key)
            .map_err(|e| SessionStoreError::BackendError(e.to_string()))?;
        Ok(())
    }

    async fn destroy_session(&self, session_id: &str) -> Result<bool, SessionStoreError> {
        let session_key = get_key(session_id);

        let mut conn = self.conn.write().await;
        let removed: usize = conn
            .del(&session_key)
            .map_err(|e| SessionStoreError::BackendError(e.to_string()))?;
        Ok(removed > 0)
    }
}

// Prefix keeps sessions apart from anything else living in the same database
const SESSION_KEY_PREFIX: &str = "session:";

fn get_key(session_id: &str) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, session_id)
}

// Write and TTL refresh go out as one MULTI/EXEC, so a session key never
// exists without an expiry
fn set_pipeline(session_key: &str, key: &str, payload: &str, ttl: u64) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .hset(session_key, key, payload)
        .ignore()
        .expire(session_key, ttl as i64)
        .ignore();
    pipe
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use testcontainers_modules::{redis::Redis, testcontainers::runners::AsyncRunner};

    #[test]
    fn test_key_prefix() {
        assert_eq!(get_key("abc"), "session:abc");
    }

    #[test]
    fn test_set_is_a_single_transaction() {
        let packed = set_pipeline("session:abc", "profiles", "[]", 60).get_packed_pipeline();
        let packed = String::from_utf8(packed).unwrap();

        let multi = packed.find("MULTI").unwrap();
        let hset = packed.find("HSET").unwrap();
        let expire = packed.find("EXPIRE").unwrap();
        let exec = packed.find("EXEC").unwrap();
        assert!(multi < hset && hset < expire && expire < exec);
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn test_redis_session_store_round_trip() {
        let container = Redis::default().start().await.unwrap();
        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(6379).await.unwrap();

        let client = redis::Client::open(format!("redis://{host}:{port}/")).unwrap();
        let conn = Arc::new(RwLock::new(client.get_connection().unwrap()));
        let store = RedisSessionStore::new(conn, 60);

        assert_eq!(store.get("s1", "profiles").await.unwrap(), None);

        store.set("s1", "profiles", json!([["github", {"id": "1"}]])).await.unwrap();
        let ttl: i64 = client.get_connection().unwrap().ttl(get_key("s1")).unwrap();
        assert!(ttl > 0 && ttl <= 60);

        assert_eq!(
            store.get("s1", "profiles").await.unwrap(),
            Some(json!([["github", {"id": "1"}]]))
        );

        store.remove("s1", "profiles").await.unwrap();
        assert_eq!(store.get("s1", "profiles").await.unwrap(), None);

        store.set("s1", "other", json!(1)).await.unwrap();
        assert!(store.destroy_session("s1").await.unwrap());
        assert!(!store.destroy_session("s1").await.unwrap());
    }
}
