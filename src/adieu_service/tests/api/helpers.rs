use std::sync::Arc;

use adieu_adapters::{
    config::constants::{DEFAULT_SESSION_COOKIE_NAME, test},
    persistence::DashMapSessionStore,
};
use adieu_application::{Config, ProfileManager, ProfileScope};
use adieu_core::{LogoutPolicy, ProfileMap, SimpleWebContext};
use adieu_service::LogoutService;
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub session_store: DashMapSessionStore,
    pub http_client: reqwest::Client,
}

impl TestApp {
    pub async fn new(config: Config, policy: LogoutPolicy) -> Self {
        let session_store = DashMapSessionStore::new();
        let service = LogoutService::new(
            config,
            Arc::new(session_store.clone()),
            policy,
            DEFAULT_SESSION_COOKIE_NAME,
        );

        let listener = TcpListener::bind(test::APP_ADDRESS).await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let _ = tokio::spawn(service.run_standalone(listener));

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            session_store,
            http_client,
        }
    }

    /// Open a session holding `profiles` and return its identifier
    pub async fn login(&self, profiles: &ProfileMap) -> String {
        let session_id = self.session_store.create_session();
        let mut context = SimpleWebContext::new().with_session_id(&session_id);
        self.manager()
            .set(&mut context, ProfileScope::Session, profiles)
            .await;
        session_id
    }

    pub async fn session_profiles(&self, session_id: &str) -> ProfileMap {
        let context = SimpleWebContext::new().with_session_id(session_id);
        self.manager().get(&context, ProfileScope::Session).await
    }

    pub async fn get_logout(&self, query: &str, session_id: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}/logout{}", self.address, query))
            .header(
                reqwest::header::COOKIE,
                format!("{DEFAULT_SESSION_COOKIE_NAME}={session_id}"),
            )
            .send()
            .await
            .expect("Failed to execute request.")
    }

    fn manager(&self) -> ProfileManager {
        ProfileManager::new(Arc::new(self.session_store.clone()))
    }
}
