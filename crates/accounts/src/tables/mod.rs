//! Tabular input and output.
//!
//! All tables are headerless. Rows may be shorter than the expected column
//! count; missing cells are treated as empty.

mod reader;
mod sink;

use std::fmt;
use std::str::FromStr;

pub use reader::{load_credentials, load_sites, read_credentials, read_sites};
pub use sink::{FileReportSink, ReportSink, write_report};

/// Supported table encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Csv,
    Tsv,
}

impl TableFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            other => Err(format!("unsupported table format: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("csv".parse::<TableFormat>(), Ok(TableFormat::Csv));
        assert_eq!("TSV".parse::<TableFormat>(), Ok(TableFormat::Tsv));
        assert!("xlsx".parse::<TableFormat>().is_err());
        assert_eq!(TableFormat::default().to_string(), "csv");
    }
}
