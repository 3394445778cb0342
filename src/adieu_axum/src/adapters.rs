//! Axum implementations of the logout flow's HTTP seams.

use std::collections::HashMap;

use adieu_core::{HttpActionAdapter, LogoutOutcome, ProfileMap, USER_PROFILES_KEY, WebContext};
use axum::{
    Json,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde_json::Value;

/// Request view built from Axum's request parts.
///
/// Owns what it read from the request so request attributes can be written
/// while the logout flow runs.
#[derive(Debug, Clone, Default)]
pub struct AxumWebContext {
    parameters: HashMap<String, String>,
    attributes: HashMap<String, Value>,
    session_id: Option<String>,
    path: String,
}

impl AxumWebContext {
    /// Read query parameters, the session cookie named `session_cookie_name`,
    /// and any [`ProfileMap`] an upstream layer put in the request extensions.
    pub fn from_parts(parts: &Parts, session_cookie_name: &str) -> Self {
        let mut parameters = HashMap::new();
        if let Some(query) = parts.uri.query() {
            for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
                parameters
                    .entry(name.into_owned())
                    .or_insert_with(|| value.into_owned());
            }
        }

        let session_id = CookieJar::from_headers(&parts.headers)
            .get(session_cookie_name)
            .map(|cookie| cookie.value().to_string());

        let mut attributes = HashMap::new();
        if let Some(profiles) = parts.extensions.get::<ProfileMap>() {
            match serde_json::to_value(profiles) {
                Ok(value) => {
                    attributes.insert(USER_PROFILES_KEY.to_string(), value);
                }
                Err(e) => tracing::warn!(error = %e, "Failed to encode request profiles"),
            }
        }

        Self {
            parameters,
            attributes,
            session_id,
            path: parts.uri.path().to_string(),
        }
    }
}

impl WebContext for AxumWebContext {
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

/// Turns a [`LogoutOutcome`] into an Axum response:
/// `302 Found` with `Location`, `204 No Content`, or `400` with a JSON error.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxumActionAdapter;

impl HttpActionAdapter for AxumActionAdapter {
    type Response = Response;

    fn adapt(&self, outcome: LogoutOutcome, _context: &dyn WebContext) -> Response {
        match outcome {
            LogoutOutcome::Redirect(action) => (
                StatusCode::FOUND,
                [(header::LOCATION, action.location().to_string())],
            )
                .into_response(),
            LogoutOutcome::NoContent => StatusCode::NO_CONTENT.into_response(),
            LogoutOutcome::Rejected { reason } => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": reason })),
            )
                .into_response(),
        }
    }
}
