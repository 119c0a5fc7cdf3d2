//! Report error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::credentials::CredentialError;

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that abort a report run.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A site or credential table could not be opened or parsed.
    #[error("Cannot open {kind} file {}: {reason}", .path.display())]
    InputLoad {
        kind: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// The endpoint could not be reached.
    #[error("Cannot connect to {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },

    /// The endpoint answered with something undecodable or a fault.
    #[error("Invalid response from {endpoint}: {reason}")]
    Protocol { endpoint: String, reason: String },

    /// The report could not be written.
    #[error("Cannot write output file {}: {reason}", .path.display())]
    OutputWrite { path: PathBuf, reason: String },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// HTTP client construction failed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure raised while processing a particular site.
    #[error("Site {url}: {source}")]
    Site {
        url: String,
        #[source]
        source: Box<ReportError>,
    },
}

impl ReportError {
    pub fn transport(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    pub fn protocol(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::Protocol {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    pub fn input_load(kind: &'static str, path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InputLoad {
            kind,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn output_write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::OutputWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Attach the url of the site that triggered this error.
    pub fn for_site(self, url: impl Into<String>) -> Self {
        Self::Site {
            url: url.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error with any site annotation stripped.
    pub fn root(&self) -> &ReportError {
        match self {
            Self::Site { source, .. } => source.root(),
            other => other,
        }
    }

    /// Url of the site that failed, when known.
    pub fn site_url(&self) -> Option<&str> {
        match self {
            Self::Site { url, .. } => Some(url),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.root(), Self::Transport { .. })
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self.root(), Self::Protocol { .. })
    }
}
