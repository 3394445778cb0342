use std::{fmt, sync::Arc};

use crate::{
    ports::{registry::ClientRegistry, session_store::SessionStore},
    strategies::logout_action_builder::{FnLogoutActionBuilder, LogoutActionBuilder},
    web_context::WebContext,
    RedirectAction, UserProfile,
};

/// A registered integration with one identity provider.
#[derive(Clone)]
pub struct Client {
    name: String,
    callback_url: Option<String>,
    logout_action_builder: Option<Arc<dyn LogoutActionBuilder>>,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callback_url: None,
            logout_action_builder: None,
        }
    }

    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    pub fn with_logout_action_builder<B>(mut self, builder: B) -> Self
    where
        B: LogoutActionBuilder + 'static,
    {
        self.logout_action_builder = Some(Arc::new(builder));
        self
    }

    /// Use a plain synchronous function as the logout action builder.
    pub fn with_logout_action_fn<F>(self, builder: F) -> Self
    where
        F: Fn(&dyn WebContext, &dyn SessionStore, &UserProfile, Option<&str>) -> Option<RedirectAction>
            + Send
            + Sync
            + 'static,
    {
        self.with_logout_action_builder(FnLogoutActionBuilder::new(builder))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref()
    }

    pub fn logout_action_builder(&self) -> Option<&dyn LogoutActionBuilder> {
        self.logout_action_builder.as_deref()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("name", &self.name)
            .field("callback_url", &self.callback_url)
            .field(
                "logout_action_builder",
                &self.logout_action_builder.as_ref().map(|_| ".."),
            )
            .finish()
    }
}

/// The set of registered clients.
#[derive(Debug, Clone, Default)]
pub struct Clients {
    clients: Vec<Client>,
}

impl Clients {
    pub fn new(clients: impl IntoIterator<Item = Client>) -> Self {
        Self {
            clients: clients.into_iter().collect(),
        }
    }

    pub fn builder() -> ClientsBuilder {
        ClientsBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl ClientRegistry for Clients {
    /// Lookup ignores case and surrounding whitespace
    fn find_client(&self, name: &str) -> Option<&Client> {
        let wanted = name.trim();
        self.clients
            .iter()
            .find(|client| client.name.trim().eq_ignore_ascii_case(wanted))
    }

    fn clients(&self) -> &[Client] {
        &self.clients
    }
}

#[derive(Debug, Default)]
pub struct ClientsBuilder {
    callback_url: Option<String>,
    clients: Vec<Client>,
}

impl ClientsBuilder {
    /// Callback URL applied to every client that does not define its own
    pub fn callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    pub fn client(mut self, client: Client) -> Self {
        self.clients.push(client);
        self
    }

    pub fn clients(mut self, clients: impl IntoIterator<Item = Client>) -> Self {
        self.clients.extend(clients);
        self
    }

    pub fn build(self) -> Clients {
        let callback_url = self.callback_url;
        let clients = self
            .clients
            .into_iter()
            .map(|mut client| {
                if client.callback_url.is_none() {
                    client.callback_url = callback_url.clone();
                }
                client
            })
            .collect();

        Clients { clients }
    }
}
