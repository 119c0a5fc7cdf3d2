//! Remote account listing.

mod client;
mod config;
mod pagination;

pub use client::{AccountListing, PageRequest, XmlRpcClient};
pub use config::ClientConfig;
pub use pagination::{PAGE_SIZE, PaginatedFetcher};
