mod cli;
mod config;
mod error;
mod output;
mod prompt;

use std::process;

use accounts_aggregator::{
    AggregationDriver, CredentialResolver, CredentialTable, FileReportSink, ProgressSink,
    RunOutcome, TracingProgress, XmlRpcClient, load_credentials, load_sites,
};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::{
    cli::{Args, Commands, ReportArgs},
    config::AppConfig,
    error::{AppError, Result},
    output::ConsoleProgress,
};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let console = ConsoleProgress::new(!args.no_color);

    if let Err(e) = run(args).await {
        debug!("Application error: {:?}", e);
        console.print_error(&e.to_string());
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    init_logging(args.verbose, args.quiet);

    match args.command {
        Some(Commands::Completions { shell }) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Args::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }

        Some(Commands::Config { show, reset }) => {
            if reset {
                let path = AppConfig::reset(args.config.as_deref())?;
                println!("Configuration reset to defaults in {}", path.display());
            } else if show {
                let config = AppConfig::load(args.config.as_deref())?;
                print!("{}", config.show()?);
            } else {
                match AppConfig::default_path() {
                    Some(path) => println!("Configuration file: {}", path.display()),
                    None => println!("No configuration directory available"),
                }
            }
        }

        None => {
            let config = AppConfig::load(args.config.as_deref())?;
            let colored = config.colored && !args.no_color;
            report(args.report, &config, colored, args.quiet).await?;
        }
    }

    Ok(())
}

/// Run one report. Under `quiet` progress only goes to the log.
async fn report(
    args: ReportArgs,
    config: &AppConfig,
    colored: bool,
    quiet: bool,
) -> Result<RunOutcome> {
    let output_file = args
        .output_file
        .ok_or_else(|| AppError::InvalidInput("--output-file is required".to_owned()))?;

    let sites = match &args.input_file {
        Some(path) => load_sites(path, args.input_format.into())?,
        None if args.no_prompt => {
            return Err(AppError::InvalidInput(
                "--input-file is required with --no-prompt".to_owned(),
            ));
        }
        None => vec![prompt::site_from_prompt()?],
    };
    info!(sites = sites.len(), "Loaded sites");

    let table = match &args.credentials_file {
        Some(path) => load_credentials(path, args.credentials_format.into())?,
        None => CredentialTable::default(),
    };
    let interactive = !args.no_prompt && config.prompt_for_credentials;
    let mut credentials = CredentialResolver::new(table, prompt::credential_source(interactive));

    let mut client_config = config.client_config();
    if let Some(secs) = args.timeout {
        client_config = client_config.with_timeout(
            (secs > 0).then(|| std::time::Duration::from_secs(secs)),
        );
    }
    let client = XmlRpcClient::new(client_config)?;

    let progress: Box<dyn ProgressSink> = if quiet {
        Box::new(TracingProgress)
    } else {
        Box::new(ConsoleProgress::new(colored))
    };
    let mut sink = FileReportSink::new(output_file, args.output_format.into());
    let mut driver = AggregationDriver::new(&client, progress.as_ref());

    let outcome = driver.run(&sites, &mut credentials, &mut sink).await?;
    match &outcome {
        RunOutcome::Completed(rows) => {
            info!(rows = rows.len(), path = %sink.path().display(), "Report written")
        }
        RunOutcome::CompletedEmpty => debug!("Nothing to write"),
    }
    Ok(outcome)
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        env_or_default_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(verbose)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// `RUST_LOG` directives when set and valid, otherwise warnings and errors only.
fn env_or_default_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
