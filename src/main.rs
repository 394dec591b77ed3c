//! ipshard - Deterministic IP Address Sharding
//!
//! Prints the slice of an address pool assigned to one shard.

use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use ipshard::cli::{Cli, Commands};
use ipshard::config::Config;
use ipshard::error::exit_code_for;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity. Diagnostics go to stderr so that
    // stdout only ever carries addresses.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("ERROR: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Version = cli.command {
        println!("ipshard {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Shard(args) => ipshard::commands::shard::run(&args, &config),
        Commands::Plan(args) => ipshard::commands::plan::run(&args, &config),
        Commands::Locate(args) => ipshard::commands::locate::run(&args, &config),
        Commands::Version => Ok(()),
    }
}
