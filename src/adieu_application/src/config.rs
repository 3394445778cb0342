use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use adieu_core::{Client, ClientRegistry, Clients};

use crate::profile_manager::{
    DefaultProfileManagerFactory, ProfileManagerFactory, default_profile_manager_factory,
};

static GLOBAL_CONFIG: OnceLock<Config> = OnceLock::new();

/// Registry of clients plus the collaborators the logout flow resolves from it.
///
/// Constructed once with [`Config::builder`] and passed by reference to every
/// invocation. Integrations that cannot thread a reference through may install
/// one process-wide instance with [`Config::install_global`].
#[derive(Clone, Default)]
pub struct Config {
    clients: Clients,
    profile_manager_factory: Option<Arc<dyn ProfileManagerFactory>>,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn clients(&self) -> &Clients {
        &self.clients
    }

    /// Own factory, else the process default, else `DefaultProfileManagerFactory`.
    pub fn profile_manager_factory(&self) -> Arc<dyn ProfileManagerFactory> {
        self.profile_manager_factory
            .clone()
            .or_else(default_profile_manager_factory)
            .unwrap_or_else(|| Arc::new(DefaultProfileManagerFactory) as Arc<dyn ProfileManagerFactory>)
    }

    /// Install `config` as the process-wide fallback.
    ///
    /// The first install wins; later calls leave the installed value untouched and
    /// return `false`.
    pub fn install_global(config: Config) -> bool {
        let installed = GLOBAL_CONFIG.set(config).is_ok();
        if installed {
            tracing::info!("Global config installed");
        } else {
            tracing::debug!("Global config already installed, ignoring");
        }
        installed
    }

    pub fn global() -> Option<&'static Config> {
        GLOBAL_CONFIG.get()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("clients", &self.clients)
            .field(
                "profile_manager_factory",
                &self.profile_manager_factory.as_ref().map(|_| ".."),
            )
            .finish()
    }
}

#[derive(Default)]
pub struct ConfigBuilder {
    clients: Option<Clients>,
    extra_clients: Vec<Client>,
    profile_manager_factory: Option<Arc<dyn ProfileManagerFactory>>,
}

impl ConfigBuilder {
    /// Replace the registry wholesale
    pub fn clients(mut self, clients: Clients) -> Self {
        self.clients = Some(clients);
        self
    }

    /// Register one more client on top of `clients`
    pub fn client(mut self, client: Client) -> Self {
        self.extra_clients.push(client);
        self
    }

    pub fn profile_manager_factory<F>(mut self, factory: F) -> Self
    where
        F: ProfileManagerFactory + 'static,
    {
        self.profile_manager_factory = Some(Arc::new(factory));
        self
    }

    pub fn build(self) -> Config {
        let clients = match (self.clients, self.extra_clients.is_empty()) {
            (Some(clients), true) => clients,
            (Some(clients), false) => Clients::new(
                clients
                    .clients()
                    .iter()
                    .cloned()
                    .chain(self.extra_clients),
            ),
            (None, _) => Clients::new(self.extra_clients),
        };

        Config {
            clients,
            profile_manager_factory: self.profile_manager_factory,
        }
    }
}
