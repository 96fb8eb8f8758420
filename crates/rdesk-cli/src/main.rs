//! # rdesk CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rdesk_cli::browse::{run_browse, BrowseArgs};
use rdesk_cli::client::ReviewClient;
use rdesk_cli::config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use rdesk_cli::list::{run_list, ListArgs};
use rdesk_cli::submit::{run_submit, SubmitArgs};

/// Review Desk client.
///
/// Lists, filters and submits document review requests against a running
/// Review Desk API.
#[derive(Parser, Debug)]
#[command(name = "rdesk", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base URL of the Review Desk API.
    #[arg(long, env = "RDESK_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List review requests, optionally filtered and sorted.
    List(ListArgs),

    /// Submit a new review request.
    Submit(SubmitArgs),

    /// Browse interactively: search, filter, sort and edit statuses.
    Browse(BrowseArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    let config = ClientConfig::new(&cli.api_url, cli.timeout_secs)?;
    tracing::debug!(api_url = %config.api_url, "rdesk starting");
    let client = ReviewClient::new(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List(args) => run_list(&args, &client, &mut out).await,
        Commands::Submit(args) => {
            let today = chrono::Local::now().date_naive();
            run_submit(args, &client, today, &mut out).await
        }
        Commands::Browse(args) => {
            let stdin = std::io::stdin();
            run_browse(&args, &client, stdin.lock(), &mut out).await
        }
    }
}
