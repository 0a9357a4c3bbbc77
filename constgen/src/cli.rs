//! Command-line interface definitions for constgen.

use clap::Parser;
use std::path::PathBuf;

/// constgen - generate CPython enum/flag registration code from a C header
///
/// Reads the header from stdin and writes the generated C to stdout unless
/// told otherwise.
#[derive(Parser, Debug)]
#[command(name = "constgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read the header from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the generated source to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to constgen.toml configuration file
    #[arg(short, long, env = "CONSTGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fail if any constant class matches nothing in the header
    #[arg(long)]
    pub strict: bool,

    /// Print the compiled-in constant classes and exit
    #[arg(long)]
    pub list: bool,

    /// Enable verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Default log filter directive when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
