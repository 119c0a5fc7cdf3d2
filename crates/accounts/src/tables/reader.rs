use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::TableFormat;
use crate::{
    credentials::{Credential, CredentialTable},
    error::{ReportError, Result},
    site::Site,
};

fn reader<R: Read>(source: R, format: TableFormat) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(format.delimiter())
        .from_reader(source)
}

fn open(kind: &'static str, path: &Path) -> Result<File> {
    File::open(path).map_err(|e| ReportError::input_load(kind, path, e))
}

/// Parse site rows: `url, platform, staging_endpoint`.
///
/// Rows with an empty url are skipped.
pub fn read_sites<R: Read>(source: R, format: TableFormat) -> std::result::Result<Vec<Site>, csv::Error> {
    let mut sites = Vec::new();
    for record in reader(source, format).records() {
        let record = record?;
        let url = record.get(0).unwrap_or_default();
        if let Some(site) = Site::from_cells(url, record.get(1), record.get(2)) {
            sites.push(site);
        }
    }
    Ok(sites)
}

/// Parse credential rows: `key, username, password`.
///
/// Rows with an empty key are skipped; for a repeated key the last row wins.
pub fn read_credentials<R: Read>(
    source: R,
    format: TableFormat,
) -> std::result::Result<CredentialTable, csv::Error> {
    let mut table = CredentialTable::new();
    for record in reader(source, format).records() {
        let record = record?;
        let key = record.get(0).unwrap_or_default();
        if key.is_empty() {
            continue;
        }
        let credential = Credential::new(
            record.get(1).unwrap_or_default(),
            record.get(2).unwrap_or_default(),
        );
        table.insert(key, credential);
    }
    Ok(table)
}

pub fn load_sites(path: &Path, format: TableFormat) -> Result<Vec<Site>> {
    let sites = read_sites(open("input", path)?, format)
        .map_err(|e| ReportError::input_load("input", path, e))?;
    debug!(path = %path.display(), count = sites.len(), "Loaded sites");
    Ok(sites)
}

pub fn load_credentials(path: &Path, format: TableFormat) -> Result<CredentialTable> {
    let table = read_credentials(open("credentials", path)?, format)
        .map_err(|e| ReportError::input_load("credentials", path, e))?;
    debug!(path = %path.display(), count = table.len(), "Loaded credentials");
    Ok(table)
}
