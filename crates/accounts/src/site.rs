//! Site model.

/// A remote site to collect accounts from.
///
/// `url` identifies the site in the report. `platform`, when present, is
/// the credential lookup key; `staging_endpoint`, when present, is the host
/// actually contacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub url: String,
    pub platform: Option<String>,
    pub staging_endpoint: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

impl Site {
    /// Site for a url known to be non-empty. Use [`Site::parse`] or
    /// [`Site::from_cells`] for user input.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            platform: None,
            staging_endpoint: None,
        }
    }

    /// Site for a single url, `None` when it is empty after trimming.
    pub fn parse(url: &str) -> Option<Self> {
        Self::from_cells(url.trim(), None, None)
    }

    /// Build a site from raw table cells. Returns `None` when the url is empty.
    pub fn from_cells(url: &str, platform: Option<&str>, staging: Option<&str>) -> Option<Self> {
        if url.is_empty() {
            return None;
        }
        Some(Self {
            url: url.to_owned(),
            platform: non_empty(platform),
            staging_endpoint: non_empty(staging),
        })
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_staging_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.staging_endpoint = Some(endpoint.into());
        self
    }

    /// Key used to look up credentials: the platform if set, else the url.
    pub fn credential_key(&self) -> &str {
        self.platform
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.url)
    }

    /// Endpoint to contact: the staging endpoint if set, else the url.
    pub fn endpoint(&self) -> &str {
        self.staging_endpoint
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(&self.url)
    }
}
