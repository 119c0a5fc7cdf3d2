//! Credential resolver.
//!
//! Resolves the credentials used for a site's credential key.

use tracing::{debug, instrument};

use super::{Credential, CredentialError, CredentialSource, CredentialTable};

/// Looks credentials up in the preloaded table, falling back to another
/// source (normally an interactive prompt).
///
/// Credentials obtained from the fallback are stored in the in-memory table,
/// so a key is asked for at most once per run. Nothing is persisted.
pub struct CredentialResolver {
    table: CredentialTable,
    fallback: Box<dyn CredentialSource>,
}

impl CredentialResolver {
    pub fn new(table: CredentialTable, fallback: Box<dyn CredentialSource>) -> Self {
        Self { table, fallback }
    }

    /// Resolve the credentials for `key`.
    ///
    /// # Corner Cases
    /// - Empty usernames or passwords from the fallback are accepted as-is
    /// - A fallback returning `None` is an error: the site cannot be queried
    #[instrument(skip(self))]
    pub fn resolve(&mut self, key: &str) -> Result<Credential, CredentialError> {
        if let Some(credential) = self.table.get(key) {
            debug!("Found credentials in table");
            return Ok(credential.clone());
        }

        debug!("Credentials not in table, asking fallback source");
        let credential = self
            .fallback
            .fetch(key)?
            .ok_or_else(|| CredentialError::Missing(key.to_owned()))?;
        self.table.insert(key, credential.clone());
        Ok(credential)
    }

    pub fn table(&self) -> &CredentialTable {
        &self.table
    }
}
