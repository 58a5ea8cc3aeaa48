//! # brp-bytecompile CLI
//!
//! This is the binary entry point for the `brp-bytecompile` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Running the planning pipeline and handing its commands to a runner.
//! - Translating errors into the documented exit codes (10 for root
//!   conflicts, 11 for orphaned library directories).
//!
//! The core logic lives in the `lib.rs` library crate, so the binary stays a
//! thin wrapper around it.

mod cli;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    std::process::exit(cli.execute());
}
