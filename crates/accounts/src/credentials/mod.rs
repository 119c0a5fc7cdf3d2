//! Credential resolution.
//!
//! - [`CredentialTable`]: credentials loaded up front, keyed by platform or url
//! - [`CredentialSource`]: anything that can supply credentials for a key
//! - [`CredentialResolver`]: table first, then a fallback source, caching
//!   whatever the fallback supplied

mod error;
mod resolver;
mod source;
mod types;

pub use error::CredentialError;
pub use resolver::CredentialResolver;
pub use source::{CredentialSource, NoPrompt};
pub use types::{Credential, CredentialTable};
