//! Command-line surface of the resource.
//!
//! The orchestrator runs `/opt/resource/check`, `/opt/resource/in <dir>`,
//! and `/opt/resource/out <dir>`. Those can be symlinks to this binary: when
//! the program name is one of the commands it is treated as the subcommand.

use std::ffi::OsString;
use std::path::Path;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

/// Pull request resource for CI pipelines.
#[derive(Debug, Parser)]
#[command(name = "prwatch", version, about)]
pub struct Cli {
    /// Resource command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// The three resource commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Find and mark the next unseen pull request commit.
    Check,
    /// Check out a version into a directory.
    In {
        /// Directory receiving the checkout.
        destination: Option<Utf8PathBuf>,
    },
    /// Post a build status for a checked-out tree.
    Out {
        /// Directory that relative `params.path` values are resolved against.
        sources: Option<Utf8PathBuf>,
    },
}

const COMMAND_NAMES: [&str; 3] = ["check", "in", "out"];

/// Inserts the subcommand when the program was invoked as `check`, `in`, or
/// `out`.
pub fn normalise_args<I>(raw_args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = raw_args.into_iter().collect();
    let invoked_as = args
        .first()
        .and_then(|program| Path::new(program).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| COMMAND_NAMES.contains(name))
        .map(ToOwned::to_owned);

    if let Some(command) = invoked_as {
        args.insert(1, OsString::from(command));
    }
    args
}
