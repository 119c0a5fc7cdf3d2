#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use accounts_aggregator::{
    AccountListing, Credential, PageRequest, ProgressEvent, ProgressSink, RemoteAccount,
    ReportError, ReportRow, ReportSink, Result,
};
use async_trait::async_trait;

/// What a fake endpoint answers.
pub enum Behavior {
    /// Page lengths; accounts are generated.
    Pages(Vec<usize>),
    /// One fixed page.
    Accounts(Vec<RemoteAccount>),
    Unreachable,
    Fault,
}

/// In-memory sites keyed by endpoint.
#[derive(Default)]
pub struct FakeSites {
    endpoints: HashMap<String, Behavior>,
    pub calls: Mutex<Vec<(String, Credential, PageRequest)>>,
}

impl FakeSites {
    pub fn with(mut self, endpoint: &str, behavior: Behavior) -> Self {
        self.endpoints.insert(endpoint.to_owned(), behavior);
        self
    }

    pub fn endpoints_called(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for (endpoint, _, _) in self.calls.lock().unwrap().iter() {
            if seen.last() != Some(endpoint) {
                seen.push(endpoint.clone());
            }
        }
        seen
    }
}

#[async_trait]
impl AccountListing for FakeSites {
    async fn list_accounts(
        &self,
        endpoint: &str,
        credential: &Credential,
        page: PageRequest,
    ) -> Result<Vec<RemoteAccount>> {
        let call_index = {
            let mut calls = self.calls.lock().unwrap();
            let index = calls
                .iter()
                .filter(|(called, _, _)| called == endpoint)
                .count();
            calls.push((endpoint.to_owned(), credential.clone(), page));
            index
        };

        match self.endpoints.get(endpoint) {
            Some(Behavior::Pages(pages)) => {
                let len = pages.get(call_index).copied().unwrap_or(0);
                Ok((0..len)
                    .map(|i| {
                        RemoteAccount::new(format!("u{}@{}", page.offset + i, endpoint), ["author"])
                    })
                    .collect())
            }
            Some(Behavior::Accounts(accounts)) => Ok(accounts.clone()),
            Some(Behavior::Fault) => Err(ReportError::protocol(endpoint, "fault 403: denied")),
            Some(Behavior::Unreachable) | None => {
                Err(ReportError::transport(endpoint, "connection refused"))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    SiteStarted(usize, usize, String),
    SiteCompleted(String, usize),
    NoData,
    Writing(String),
    Finished,
}

#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<Recorded>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn emit(&self, event: ProgressEvent<'_>) {
        let recorded = match event {
            ProgressEvent::SiteStarted { index, total, url } => {
                Recorded::SiteStarted(index, total, url.to_owned())
            }
            ProgressEvent::SiteCompleted { url, rows } => Recorded::SiteCompleted(url.to_owned(), rows),
            ProgressEvent::NoData => Recorded::NoData,
            ProgressEvent::Writing { destination } => Recorded::Writing(destination.to_owned()),
            ProgressEvent::Finished => Recorded::Finished,
        };
        self.events.lock().unwrap().push(recorded);
    }
}

/// Keeps rows in memory; `None` until written.
#[derive(Default)]
pub struct MemorySink {
    pub written: Option<Vec<ReportRow>>,
}

impl ReportSink for MemorySink {
    fn destination(&self) -> String {
        "memory".to_owned()
    }

    fn write_rows(&mut self, rows: &[ReportRow]) -> Result<()> {
        self.written = Some(rows.to_vec());
        Ok(())
    }
}
