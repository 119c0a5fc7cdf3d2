//! Credential source abstraction.
//!
//! The interactive terminal implementation lives in the CLI.

use super::{Credential, CredentialError};

pub trait CredentialSource: Send + Sync {
    /// Supply credentials for `key`, or `None` if this source has none.
    fn fetch(&self, key: &str) -> Result<Option<Credential>, CredentialError>;
}

/// A source that never supplies anything, for unattended runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl CredentialSource for NoPrompt {
    fn fetch(&self, _key: &str) -> Result<Option<Credential>, CredentialError> {
        Ok(None)
    }
}
