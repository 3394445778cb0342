//! Framework-agnostic view of the current HTTP exchange.
//!
//! Web frameworks implement [`WebContext`] on a newtype of their own request
//! type so the logout flow can run without knowing which framework it lives in.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  adieu_core: WebContext trait            │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  adieu_axum: AxumWebContext newtype      │
//! │  impl WebContext for AxumWebContext { }  │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  LogoutUseCase is generic over C         │
//! └──────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde_json::Value;

/// Request-level data the logout flow reads and writes.
///
/// Request attributes live exactly as long as the request; they form the
/// request-scoped half of profile storage.
pub trait WebContext: Send + Sync {
    /// First value of a query or form parameter.
    fn request_parameter(&self, name: &str) -> Option<&str>;

    fn request_attribute(&self, name: &str) -> Option<&Value>;

    fn set_request_attribute(&mut self, name: &str, value: Value);

    fn remove_request_attribute(&mut self, name: &str);

    /// Identifier of the session bound to this request, if there is one.
    fn session_id(&self) -> Option<&str>;

    /// Request path, used for logging only
    fn path(&self) -> &str;
}

/// In-memory `WebContext` for non-HTTP callers and tests.
#[derive(Debug, Clone, Default)]
pub struct SimpleWebContext {
    parameters: HashMap<String, String>,
    attributes: HashMap<String, Value>,
    session_id: Option<String>,
    path: String,
}

impl SimpleWebContext {
    pub fn new() -> Self {
        Self {
            path: "/".to_string(),
            ..Self::default()
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

impl WebContext for SimpleWebContext {
    fn request_parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    fn request_attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    fn set_request_attribute(&mut self, name: &str, value: Value) {
        self.attributes.insert(name.to_string(), value);
    }

    fn remove_request_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn path(&self) -> &str {
        &self.path
    }
}
