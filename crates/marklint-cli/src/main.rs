//! marklint CLI: convention enforcement for attribute-driven C# code generation.
//!
//! This binary provides the `marklint` command with subcommands for checking,
//! fixing, explaining rules, and initializing a project. See `marklint --help`.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let formatter = marklint_output::formatter(cli.json);

    let exit_code = match cli.command {
        Commands::Init { force } => commands::init::run(cli.verbose, force),
        Commands::Check { paths } => commands::check::run(&*formatter, cli.verbose, paths),
        Commands::Fix { paths, apply, rule } => {
            commands::fix::run(&*formatter, cli.verbose, paths, apply, rule)
        }
        Commands::Explain { code } => commands::explain::run(&*formatter, code),
    };

    std::process::exit(exit_code);
}

/// Diagnostics go to stdout, logs to stderr. `RUST_LOG` wins over `--verbose`.
fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
