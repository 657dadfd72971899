//! burrow entry point.
//!
//! Launch the interactive shell:
//! ```bash
//! cargo run -p burrow-repl
//! ```
//!
//! Or run commands and exit:
//! ```bash
//! burrow -c 'mkdir -p /a/b
//! ls /a'
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use burrow_repl::Cli;

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var). Logs go to stderr so
    // they never interleave with the shell's stdout.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match burrow_repl::run(Cli::parse()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("burrow: {e:#}");
            ExitCode::FAILURE
        }
    }
}
