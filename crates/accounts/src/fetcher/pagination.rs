//! Paginated account fetching.
//!
//! Pages are requested in strict offset order. A page shorter than
//! [`PAGE_SIZE`] (including an empty one) ends the listing; there is no
//! total-count check, so a site whose last page is exactly full costs one
//! extra, empty request. Accounts are not deduplicated across pages.

use tracing::debug;

use super::client::{AccountListing, PageRequest};
use crate::{account::RemoteAccount, credentials::Credential, error::Result};

/// Number of accounts requested per page.
pub const PAGE_SIZE: usize = 100;

pub struct PaginatedFetcher<'a> {
    listing: &'a dyn AccountListing,
}

impl<'a> PaginatedFetcher<'a> {
    pub fn new(listing: &'a dyn AccountListing) -> Self {
        Self { listing }
    }

    /// Fetch every page for one endpoint, in page order.
    ///
    /// The first failing page aborts the whole fetch; nothing fetched so far
    /// is returned.
    pub async fn fetch_all(
        &self,
        endpoint: &str,
        credential: &Credential,
    ) -> Result<Vec<RemoteAccount>> {
        let mut accounts = Vec::new();
        let mut offset = 0;

        loop {
            let page = self
                .listing
                .list_accounts(
                    endpoint,
                    credential,
                    PageRequest {
                        offset,
                        number: PAGE_SIZE,
                    },
                )
                .await?;
            let fetched = page.len();
            debug!(endpoint, offset, fetched, "Fetched account page");

            accounts.extend(page);
            if fetched != PAGE_SIZE {
                break;
            }
            offset += PAGE_SIZE;
        }

        Ok(accounts)
    }
}
