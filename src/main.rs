//! Modcheck CLI entry point.

use clap::Parser;
use modcheck::cli::{self, Cli, Commands, EXIT_ERROR};
use modcheck::runner::Checker;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr so reports on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Variables(args) => cli::run_validate(Checker::Variables, &args),
        Commands::ScriptedLoc(args) => cli::run_validate(Checker::ScriptedLocalisation, &args),
        Commands::All(args) => cli::run_all(&args),
        Commands::Init(args) => cli::run_init(&args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
