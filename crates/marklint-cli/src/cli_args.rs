use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "marklint",
    version,
    about = "Convention enforcement for attribute-driven C# code generation"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Write a default .marklint/marklint.json
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Report convention violations
    Check {
        /// Files or directories to report on (default: the whole project)
        paths: Vec<PathBuf>,
    },

    /// Show or apply mechanical fixes
    Fix {
        /// Files or directories to fix (default: the whole project)
        paths: Vec<PathBuf>,
        /// Write fixes to disk, then re-check
        #[arg(long)]
        apply: bool,
        /// Only fix violations of this rule (e.g., UFT0002)
        #[arg(long, value_name = "CODE")]
        rule: Option<String>,
    },

    /// Describe a rule
    Explain {
        /// Rule code (e.g., UFT0001)
        code: String,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
