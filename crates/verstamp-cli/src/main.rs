//! CLI entry point - the composition root.
//!
//! Logging and `.env` loading happen here; everything else goes through
//! `bootstrap` and the command handlers.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use verstamp_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, handlers};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries the version or directives; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);
    let ctx = bootstrap(&config)?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Resolve { explain } => handlers::resolve::execute(&ctx, explain, &mut stdout),
        Commands::Write { output, lang, name } => {
            handlers::write::execute(&ctx, &output, lang, &name, &mut stdout)
        }
        Commands::CargoEnv { name } => handlers::cargo_env::execute(&ctx, &name, &mut stdout),
    }
}

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}
