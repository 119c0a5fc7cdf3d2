use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    /// Neither the table nor the fallback source had credentials.
    #[error("No credentials available for {0}")]
    Missing(String),

    /// The interactive prompt could not be completed.
    #[error("Credential prompt failed: {0}")]
    Prompt(String),
}
