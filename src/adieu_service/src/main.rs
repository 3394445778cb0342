use std::sync::Arc;

use adieu_adapters::{
    config::Settings,
    persistence::{DashMapSessionStore, RedisSessionStore},
};
use adieu_application::Config;
use adieu_core::SessionStore;
use adieu_service::{LogoutService, init_tracing};
use color_eyre::eyre::Result;
use secrecy::ExposeSecret;
use tokio::{net::TcpListener, sync::RwLock};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;

    let session_store: Arc<dyn SessionStore> = match &settings.redis {
        Some(redis) => {
            let client = redis::Client::open(redis.url.expose_secret().as_str())?;
            let conn = Arc::new(RwLock::new(client.get_connection()?));
            Arc::new(RedisSessionStore::new(conn, redis.session_ttl_secs))
        }
        None => {
            tracing::warn!("No Redis configured, sessions are kept in memory");
            Arc::new(DashMapSessionStore::new())
        }
    };

    // No clients are registered in the standalone binary, so it performs local
    // logout only. Applications embedding `LogoutService` pass their own `Config`.
    let config = Config::default();

    let service = LogoutService::new(
        config,
        session_store,
        settings.logout.to_policy(),
        settings.application.session_cookie_name.as_str(),
    );

    let listener = TcpListener::bind(&settings.application.address).await?;
    service.run_standalone(listener).await?;

    Ok(())
}
