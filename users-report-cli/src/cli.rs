use std::path::PathBuf;

use accounts_aggregator::TableFormat;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "users-report",
    author,
    version,
    about = "Collect user accounts from a list of sites into a single report",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub report: ReportArgs,

    /// Configuration file path
    #[arg(short, long, global = true, env = "USERS_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ReportArgs {
    /// Table of sites: url, platform, staging endpoint. Prompts for one url when omitted
    #[arg(long)]
    pub input_file: Option<PathBuf>,

    /// Format of the sites table
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub input_format: FormatArg,

    /// Table of credentials: key (platform or url), username, password
    #[arg(long)]
    pub credentials_file: Option<PathBuf>,

    /// Format of the credentials table
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub credentials_format: FormatArg,

    /// Where to write the report
    #[arg(long, required = true)]
    pub output_file: Option<PathBuf>,

    /// Format of the report
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub output_format: FormatArg,

    /// Fail instead of prompting for missing credentials
    #[arg(long)]
    pub no_prompt: bool,

    /// Per-request timeout in seconds, 0 to wait indefinitely (overrides config)
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or reset the configuration file
    Config {
        /// Print the effective configuration
        #[arg(long)]
        show: bool,

        /// Overwrite the configuration file with defaults
        #[arg(long, conflicts_with = "show")]
        reset: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Tsv,
}

impl From<FormatArg> for TableFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => TableFormat::Csv,
            FormatArg::Tsv => TableFormat::Tsv,
        }
    }
}
