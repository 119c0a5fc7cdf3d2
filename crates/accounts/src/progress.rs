//! Progress reporting for a report run.

use tracing::{info, warn};

/// Something worth telling the user about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent<'a> {
    /// Processing of site `index` (0-based) out of `total` started.
    SiteStarted {
        index: usize,
        total: usize,
        url: &'a str,
    },
    SiteCompleted {
        url: &'a str,
        rows: usize,
    },
    /// Every site succeeded but no row was produced; nothing is written.
    NoData,
    Writing {
        destination: &'a str,
    },
    Finished,
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent<'_>);
}

/// Reports progress through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn emit(&self, event: ProgressEvent<'_>) {
        match event {
            ProgressEvent::SiteStarted { index, total, url } => {
                info!(site = index + 1, total, "Retrieving users for site {}", url)
            }
            ProgressEvent::SiteCompleted { url, rows } => info!(rows, "Site {} done", url),
            ProgressEvent::NoData => warn!("No accounts found"),
            ProgressEvent::Writing { destination } => {
                info!("Generating output in file {}...", destination)
            }
            ProgressEvent::Finished => info!("Finished"),
        }
    }
}
