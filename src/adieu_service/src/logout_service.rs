use std::sync::Arc;

use adieu_application::Config;
use adieu_axum::{LogoutState, logout};
use adieu_core::{LogoutPolicy, SessionStore};
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Logout service exposing `GET|POST /logout`
pub struct LogoutService {
    router: Router,
}

impl LogoutService {
    /// Create a new LogoutService
    ///
    /// # Arguments
    /// * `config` - Registered clients and profile manager factory
    /// * `session_store` - Session scope shared with the rest of the application
    /// * `policy` - Default URL, URL patterns and logout flags
    /// * `session_cookie_name` - Cookie carrying the session identifier
    pub fn new(
        config: Config,
        session_store: Arc<dyn SessionStore>,
        policy: LogoutPolicy,
        session_cookie_name: impl Into<Arc<str>>,
    ) -> Self {
        let state = LogoutState::new(config, session_store, policy, session_cookie_name);

        let router = Router::new()
            .route("/logout", get(logout).post(logout))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the LogoutService into a router that can be nested into another application
    pub fn as_nested_router(self) -> Router {
        self.with_trace_layer().router
    }

    /// Run the logout service as a standalone server
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.as_nested_router();

        tracing::info!("Logout service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
