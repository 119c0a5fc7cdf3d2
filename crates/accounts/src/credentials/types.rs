//! Core credential types.

use std::collections::HashMap;
use std::fmt;

use super::{CredentialError, CredentialSource};

/// A username/password pair.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Credentials keyed by platform name or site url.
///
/// Inserting an existing key replaces the previous entry, so when a table is
/// loaded from a file the last row for a key wins.
#[derive(Debug, Clone, Default)]
pub struct CredentialTable {
    entries: HashMap<String, Credential>,
}

impl CredentialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, returning the replaced entry.
    pub fn insert(&mut self, key: impl Into<String>, credential: Credential) -> Option<Credential> {
        self.entries.insert(key.into(), credential)
    }

    pub fn get(&self, key: &str) -> Option<&Credential> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Credential)> for CredentialTable {
    fn from_iter<I: IntoIterator<Item = (K, Credential)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, credential) in iter {
            table.insert(key, credential);
        }
        table
    }
}

impl CredentialSource for CredentialTable {
    fn fetch(&self, key: &str) -> Result<Option<Credential>, CredentialError> {
        Ok(self.get(key).cloned())
    }
}
