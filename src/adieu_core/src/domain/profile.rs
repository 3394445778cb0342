use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An authenticated identity, as issued by one client.
///
/// Profiles are immutable once issued: the builder-style `with_*` methods are
/// meant for the component that creates the profile, never for code that reads
/// it back from a store.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    client_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_token: Option<String>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            client_name: None,
            attributes: BTreeMap::new(),
            id_token: None,
        }
    }

    /// Tag the profile with the name of the client that produced it
    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Attach the raw ID token the identity provider issued for this session.
    pub fn with_id_token(mut self, id_token: impl Into<String>) -> Self {
        self.id_token = Some(id_token.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_deref()
    }
}

impl fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserProfile")
            .field("id", &self.id)
            .field("client_name", &self.client_name)
            .field("attributes", &self.attributes)
            .field("id_token", &self.id_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Ordered mapping of client name to the profile that client authenticated.
///
/// Iteration follows insertion order. Re-inserting an existing name replaces the
/// profile but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileMap {
    entries: Vec<(String, UserProfile)>,
}

impl ProfileMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&UserProfile> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, profile)| profile)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert a profile, returning the one it replaced
    pub fn insert(&mut self, name: impl Into<String>, profile: UserProfile) -> Option<UserProfile> {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, profile)),
            None => {
                self.entries.push((name, profile));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<UserProfile> {
        let position = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(position).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserProfile)> {
        self.entries
            .iter()
            .map(|(name, profile)| (name.as_str(), profile))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Merge `other` into this map; entries of `other` win on conflicting names.
    pub fn extend(&mut self, other: ProfileMap) {
        for (name, profile) in other.entries {
            self.insert(name, profile);
        }
    }
}

impl<K: Into<String>> FromIterator<(K, UserProfile)> for ProfileMap {
    fn from_iter<I: IntoIterator<Item = (K, UserProfile)>>(iter: I) -> Self {
        let mut map = ProfileMap::new();
        for (name, profile) in iter {
            map.insert(name, profile);
        }
        map
    }
}

impl IntoIterator for ProfileMap {
    type Item = (String, UserProfile);
    type IntoIter = std::vec::IntoIter<(String, UserProfile)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_insert_keeps_position_on_replace() {
        let mut map = ProfileMap::new();
        map.insert("github", UserProfile::new("1"));
        map.insert("google", UserProfile::new("2"));

        let replaced = map.insert("github", UserProfile::new("3"));

        assert_eq!(replaced.map(|p| p.id().to_string()), Some("1".to_string()));
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["github", "google"]);
        assert_eq!(map.get("github").map(UserProfile::id), Some("3"));
    }

    #[test]
    fn test_serde_preserves_order() {
        let map: ProfileMap = [
            ("zeta", UserProfile::new("z").with_client_name("zeta")),
            ("alpha", UserProfile::new("a").with_client_name("alpha")),
        ]
        .into_iter()
        .collect();

        let value = serde_json::to_value(&map).unwrap();
        let decoded: ProfileMap = serde_json::from_value(value).unwrap();

        assert_eq!(decoded, map);
        assert_eq!(decoded.names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_debug_redacts_id_token() {
        let profile = UserProfile::new("1").with_id_token("eyJhbGciOi.secret.sig");
        let debug = format!("{profile:?}");

        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[quickcheck]
    fn prop_names_are_unique_in_first_seen_order(names: Vec<u8>) -> bool {
        let map: ProfileMap = names
            .iter()
            .map(|n| (n.to_string(), UserProfile::new(n.to_string())))
            .collect();

        let mut expected: Vec<String> = Vec::new();
        for n in &names {
            if !expected.contains(&n.to_string()) {
                expected.push(n.to_string());
            }
        }

        map.len() == expected.len() && map.names().eq(expected.iter().map(String::as_str))
    }
}
