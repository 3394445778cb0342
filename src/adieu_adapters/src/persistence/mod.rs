pub mod dashmap_session_store;
pub mod redis_session_store;

pub use dashmap_session_store::DashMapSessionStore;
pub use redis_session_store::RedisSessionStore;
