//! CLI binary for taskchat.
//!
//! This binary is a thin wrapper that parses arguments and delegates to the library.

use clap::Parser;
use std::process::ExitCode;
use taskchat::cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error starting async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let output = runtime.block_on(run(cli.command));
    // A stdin read left pending by Ctrl-C must not block exit
    runtime.shutdown_background();

    for msg in output.stdout {
        println!("{msg}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}
