use crate::Client;

/// Resolves provider names to registered clients.
pub trait ClientRegistry: Send + Sync {
    fn find_client(&self, name: &str) -> Option<&Client>;

    fn clients(&self) -> &[Client];
}
