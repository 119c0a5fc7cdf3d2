use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use super::TableFormat;
use crate::{
    account::ReportRow,
    error::{ReportError, Result},
};

/// Destination of the finished report.
pub trait ReportSink {
    /// Human-readable destination, for progress messages.
    fn destination(&self) -> String;

    /// Write all rows. Either every row is written or none is.
    fn write_rows(&mut self, rows: &[ReportRow]) -> Result<()>;
}

/// Encode `rows` as a headerless table: `site_url, email, roles`.
pub fn write_report<W: Write>(
    writer: W,
    rows: &[ReportRow],
    format: TableFormat,
) -> std::result::Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(format.delimiter())
        .from_writer(writer);
    for row in rows {
        wtr.write_record(row.record())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Mode requested for a new report; the process umask still applies.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o666;

/// Writes the report to a file.
///
/// Rows go to a temporary file in the destination directory which replaces
/// the destination only once everything was written. An existing destination
/// keeps its permissions, a new one gets the same mode a plain create would.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    path: PathBuf,
    format: TableFormat,
}

impl FileReportSink {
    pub fn new(path: impl Into<PathBuf>, format: TableFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn temp_file(&self) -> io::Result<NamedTempFile> {
        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(NEW_FILE_MODE));
        }
        let tmp = builder.tempfile_in(self.parent_dir())?;

        if let Ok(metadata) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(metadata.permissions())?;
        }
        Ok(tmp)
    }
}

impl ReportSink for FileReportSink {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn write_rows(&mut self, rows: &[ReportRow]) -> Result<()> {
        let mut tmp = self
            .temp_file()
            .map_err(|e| ReportError::output_write(&self.path, e))?;

        write_report(&mut tmp, rows, self.format)
            .map_err(|e| ReportError::output_write(&self.path, e))?;

        tmp.persist(&self.path)
            .map_err(|e| ReportError::output_write(&self.path, e.error))?;

        debug!(path = %self.path.display(), rows = rows.len(), "Report written");
        Ok(())
    }
}
