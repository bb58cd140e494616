//! `prwatch` entrypoint: `check`, `in`, and `out` for the pull request
//! resource.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

mod cli;

use cli::{Cli, normalise_args};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_from(normalise_args(env::args_os()));
    prwatch::telemetry::init();

    match cli::commands::run(&cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(error = ?error, "command failed");
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}
