//! Accounts aggregator: builds one user report out of many sites.
//!
//! Every configured [`Site`] is queried through a paginated account-listing
//! RPC, its accounts are normalised into [`ReportRow`]s and the merged rows
//! are handed to a [`ReportSink`] once every site has succeeded.
//!
//! ## Pipeline
//!
//! - [`CredentialResolver`] - credential table lookup with an interactive (or
//!   any other) [`CredentialSource`] as fallback
//! - [`PaginatedFetcher`] - drives the listing protocol page by page
//! - [`SiteProcessor`] - resolves endpoint and credentials for one site
//! - [`AggregationDriver`] - runs all sites in order, all-or-nothing
//!
//! ## Transport
//!
//! - [`AccountListing`] - the seam for the remote protocol
//! - [`XmlRpcClient`] - `wp.getUsers` over HTTP
//!
//! ## Tables
//!
//! - [`load_sites`] / [`load_credentials`] - tabular input
//! - [`FileReportSink`] - atomic tabular output

pub mod account;
pub mod credentials;
pub mod driver;
pub mod error;
pub mod fetcher;
pub mod processor;
pub mod progress;
pub mod site;
pub mod tables;

pub use account::{RemoteAccount, ReportRow};
pub use credentials::{
    Credential, CredentialError, CredentialResolver, CredentialSource, CredentialTable, NoPrompt,
};
pub use driver::{AggregationDriver, RunOutcome, RunState};
pub use error::{ReportError, Result};
pub use fetcher::{AccountListing, ClientConfig, PAGE_SIZE, PageRequest, PaginatedFetcher, XmlRpcClient};
pub use processor::SiteProcessor;
pub use progress::{ProgressEvent, ProgressSink, TracingProgress};
pub use site::Site;
pub use tables::{FileReportSink, ReportSink, TableFormat, load_credentials, load_sites};
