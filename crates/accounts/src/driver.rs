//! Aggregation driver.
//!
//! Sites are processed strictly in input order, one at a time: credential
//! prompts must not interleave, and a failing site aborts the whole run. No
//! row is written unless every site succeeded.

use tracing::{debug, error};

use crate::{
    account::ReportRow,
    credentials::CredentialResolver,
    error::Result,
    fetcher::AccountListing,
    processor::SiteProcessor,
    progress::{ProgressEvent, ProgressSink},
    site::Site,
    tables::ReportSink,
};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    /// Processing the site at this index.
    ProcessingSite(usize),
    /// All sites succeeded, rows merged.
    Aggregated,
    Written,
    EmptyNoOutput,
    Aborted,
}

/// Successful end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Rows were handed to the sink.
    Completed(Vec<ReportRow>),
    /// No site produced a row; the sink was not touched.
    CompletedEmpty,
}

pub struct AggregationDriver<'a> {
    processor: SiteProcessor<'a>,
    progress: &'a dyn ProgressSink,
    state: RunState,
}

impl<'a> AggregationDriver<'a> {
    pub fn new(listing: &'a dyn AccountListing, progress: &'a dyn ProgressSink) -> Self {
        Self {
            processor: SiteProcessor::new(listing),
            progress,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, next: RunState) {
        debug!(from = ?self.state, to = ?next, "Run state transition");
        self.state = next;
    }

    /// Process every site, then write the merged rows to `sink`.
    ///
    /// Any error aborts the run immediately and is returned as-is; rows
    /// collected from earlier sites are discarded.
    pub async fn run(
        &mut self,
        sites: &[Site],
        credentials: &mut CredentialResolver,
        sink: &mut dyn ReportSink,
    ) -> Result<RunOutcome> {
        let total = sites.len();
        let mut rows = Vec::new();

        for (index, site) in sites.iter().enumerate() {
            self.transition(RunState::ProcessingSite(index));
            self.progress.emit(ProgressEvent::SiteStarted {
                index,
                total,
                url: &site.url,
            });

            match self.processor.process(site, credentials).await {
                Ok(site_rows) => {
                    self.progress.emit(ProgressEvent::SiteCompleted {
                        url: &site.url,
                        rows: site_rows.len(),
                    });
                    rows.extend(site_rows);
                }
                Err(e) => {
                    error!(url = %site.url, "Site failed, aborting run: {}", e);
                    self.transition(RunState::Aborted);
                    return Err(e);
                }
            }
        }
        self.transition(RunState::Aggregated);

        if rows.is_empty() {
            self.transition(RunState::EmptyNoOutput);
            self.progress.emit(ProgressEvent::NoData);
            self.progress.emit(ProgressEvent::Finished);
            return Ok(RunOutcome::CompletedEmpty);
        }

        let destination = sink.destination();
        self.progress.emit(ProgressEvent::Writing {
            destination: &destination,
        });
        if let Err(e) = sink.write_rows(&rows) {
            self.transition(RunState::Aborted);
            return Err(e);
        }

        self.transition(RunState::Written);
        self.progress.emit(ProgressEvent::Finished);
        Ok(RunOutcome::Completed(rows))
    }
}
