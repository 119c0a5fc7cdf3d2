//! Per-site processing.

use tracing::{debug, instrument};

use crate::{
    account::ReportRow,
    credentials::CredentialResolver,
    error::{ReportError, Result},
    fetcher::{AccountListing, PaginatedFetcher},
    site::Site,
};

/// Turns one site into report rows.
pub struct SiteProcessor<'a> {
    listing: &'a dyn AccountListing,
}

impl<'a> SiteProcessor<'a> {
    pub fn new(listing: &'a dyn AccountListing) -> Self {
        Self { listing }
    }

    /// Resolve credentials and endpoint for `site`, fetch all of its accounts
    /// and keep those with an email.
    ///
    /// Errors are returned annotated with the site url.
    #[instrument(skip_all, fields(url = %site.url))]
    pub async fn process(
        &self,
        site: &Site,
        credentials: &mut CredentialResolver,
    ) -> Result<Vec<ReportRow>> {
        let key = site.credential_key();
        let endpoint = site.endpoint();
        debug!(key, endpoint, "Processing site");

        let credential = credentials
            .resolve(key)
            .map_err(|e| ReportError::from(e).for_site(&site.url))?;

        let accounts = PaginatedFetcher::new(self.listing)
            .fetch_all(endpoint, &credential)
            .await
            .map_err(|e| e.for_site(&site.url))?;

        let fetched = accounts.len();
        let rows: Vec<ReportRow> = accounts
            .into_iter()
            .filter_map(|account| ReportRow::from_account(&site.url, account))
            .collect();
        debug!(fetched, kept = rows.len(), "Normalised accounts");

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        account::RemoteAccount,
        credentials::{Credential, CredentialTable, NoPrompt},
        fetcher::PageRequest,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns fixed accounts and records which endpoint and user were used.
    struct RecordingListing {
        accounts: Vec<RemoteAccount>,
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl AccountListing for RecordingListing {
        async fn list_accounts(
            &self,
            endpoint: &str,
            credential: &Credential,
            _page: PageRequest,
        ) -> Result<Vec<RemoteAccount>> {
            self.seen
                .lock()
                .unwrap()
                .push((endpoint.to_owned(), credential.username.clone()));
            Ok(self.accounts.clone())
        }
    }

    fn resolver(entries: &[(&str, &str)]) -> CredentialResolver {
        let table: CredentialTable = entries
            .iter()
            .map(|(key, user)| (*key, Credential::new(*user, "pw")))
            .collect();
        CredentialResolver::new(table, Box::new(NoPrompt))
    }

    #[tokio::test]
    async fn test_filters_accounts_without_email() {
        let listing = RecordingListing {
            accounts: vec![
                RemoteAccount::new("a@x.com", ["admin"]),
                RemoteAccount::new("", ["editor"]),
            ],
            seen: Mutex::new(Vec::new()),
        };
        let mut credentials = resolver(&[("http://a.example", "admin")]);

        let rows = SiteProcessor::new(&listing)
            .process(&Site::new("http://a.example"), &mut credentials)
            .await
            .unwrap();

        assert_eq!(
            rows,
            vec![ReportRow {
                site_url: "http://a.example".into(),
                email: "a@x.com".into(),
                roles: "admin".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_platform_key_and_staging_endpoint() {
        let listing = RecordingListing {
            accounts: vec![RemoteAccount::new("a@x.com", ["admin", "editor"])],
            seen: Mutex::new(Vec::new()),
        };
        let mut credentials = resolver(&[("shared", "platform-user")]);
        let site = Site::new("http://prod.example")
            .with_platform("shared")
            .with_staging_endpoint("http://stage.example");

        let rows = SiteProcessor::new(&listing)
            .process(&site, &mut credentials)
            .await
            .unwrap();

        assert_eq!(
            listing.seen.lock().unwrap().as_slice(),
            &[("http://stage.example".to_owned(), "platform-user".to_owned())]
        );
        assert_eq!(rows[0].site_url, "http://prod.example");
        assert_eq!(rows[0].roles, "admin,editor");
    }

    #[tokio::test]
    async fn test_missing_credentials_are_site_errors() {
        let listing = RecordingListing {
            accounts: Vec::new(),
            seen: Mutex::new(Vec::new()),
        };
        let mut credentials = resolver(&[]);

        let err = SiteProcessor::new(&listing)
            .process(&Site::new("http://a.example"), &mut credentials)
            .await
            .unwrap_err();

        assert_eq!(err.site_url(), Some("http://a.example"));
        assert!(matches!(err.root(), ReportError::Credential(_)));
        assert!(listing.seen.lock().unwrap().is_empty());
    }
}
