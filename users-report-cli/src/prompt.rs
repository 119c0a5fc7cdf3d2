//! Terminal prompts.

use accounts_aggregator::{CredentialSource, NoPrompt, Site};
#[cfg(feature = "interactive")]
use accounts_aggregator::{Credential, CredentialError};
#[cfg(feature = "interactive")]
use inquire::{Password, PasswordDisplayMode, Text};
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::block_in_place;

use crate::error::{AppError, Result};

/// Asks for a username, then a masked password, for every key missing
/// from the credential table.
#[cfg(feature = "interactive")]
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractivePrompt;

#[cfg(feature = "interactive")]
impl CredentialSource for InteractivePrompt {
    fn fetch(&self, key: &str) -> std::result::Result<Option<Credential>, CredentialError> {
        blocking(|| ask_credential(key))
    }
}

#[cfg(feature = "interactive")]
fn ask_credential(key: &str) -> std::result::Result<Option<Credential>, CredentialError> {
    let username_message = format!("Enter username for {key}:");
    let username = Text::new(&username_message)
        .prompt()
        .map_err(|e| CredentialError::Prompt(e.to_string()))?;

    let password_message = format!("Enter password for {key}:");
    let password = Password::new(&password_message)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .map_err(|e| CredentialError::Prompt(e.to_string()))?;

    Ok(Some(Credential::new(username, password)))
}

/// Run a terminal prompt. Prompts are reached from inside the async run, so
/// on a multi-threaded runtime the worker is handed over while waiting.
#[cfg_attr(not(feature = "interactive"), allow(dead_code))]
fn blocking<R>(prompt: impl FnOnce() -> R) -> R {
    match Handle::try_current() {
        Ok(handle) if matches!(handle.runtime_flavor(), RuntimeFlavor::MultiThread) => {
            block_in_place(prompt)
        }
        _ => prompt(),
    }
}

/// The fallback used for credentials missing from the table.
pub fn credential_source(interactive: bool) -> Box<dyn CredentialSource> {
    #[cfg(feature = "interactive")]
    if interactive {
        return Box::new(InteractivePrompt);
    }
    #[cfg(not(feature = "interactive"))]
    let _ = interactive;

    Box::new(NoPrompt)
}

/// Ask for a single site url until a non-empty one is entered.
#[cfg(feature = "interactive")]
pub fn site_from_prompt() -> Result<Site> {
    loop {
        let url = blocking(|| Text::new("Enter the website URL:").prompt())
            .map_err(|e| AppError::Prompt(e.to_string()))?;
        if let Some(site) = Site::parse(&url) {
            return Ok(site);
        }
    }
}

#[cfg(not(feature = "interactive"))]
pub fn site_from_prompt() -> Result<Site> {
    Err(AppError::InvalidInput(
        "--input-file is required when interactive prompts are disabled".to_owned(),
    ))
}
