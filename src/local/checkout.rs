//! Materialising a pull request commit on disk.
//!
//! The checkout is a fixed sequence of git invocations run inside the
//! destination directory. Each step is an argv array so that URIs and refs
//! are never re-split by a shell. The first failing step aborts the
//! sequence; nothing is retried or rolled back.

use std::fmt;
use std::io;
use std::process::{Command, Stdio};

use camino::Utf8Path;

use crate::error::ResourceError;

use super::fs::ensure_directory;
use super::ssh::SshCredentials;

/// Exit status of one git invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStatus {
    code: Option<i32>,
}

impl StepStatus {
    /// Status for a process that exited with `code`.
    #[must_use]
    pub const fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Status for a process terminated by a signal.
    #[must_use]
    pub const fn killed() -> Self {
        Self { code: None }
    }

    /// Whether the process exited with code zero.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self.code, Some(0))
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Runs git with an argument vector inside a working directory.
pub trait GitRunner: fmt::Debug {
    /// Runs `git <args>` in `workdir` and reports how it exited.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the process cannot be spawned.
    fn run(&self, workdir: &Utf8Path, args: &[String]) -> io::Result<StepStatus>;
}

/// [`GitRunner`] that spawns the git executable.
///
/// Child stdout and stderr are both sent to this process's stderr so that
/// stdout stays reserved for the JSON response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessGitRunner {
    program: String,
}

impl ProcessGitRunner {
    /// Runner using the given executable.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ProcessGitRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitRunner for ProcessGitRunner {
    fn run(&self, workdir: &Utf8Path, args: &[String]) -> io::Result<StepStatus> {
        let status = Command::new(&self.program)
            .args(args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(io::stderr())
            .stderr(io::stderr())
            .status()?;

        Ok(status
            .code()
            .map_or_else(StepStatus::killed, StepStatus::exited))
    }
}

/// One git invocation in the checkout sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitStep {
    args: Vec<String>,
}

impl GitStep {
    fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments passed to git.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.args.join(" "))
    }
}

/// Builds the git steps that check out `sha` from pull request `pr_number`.
///
/// The pull request head is fetched at depth one into a local `pr` branch,
/// the commit is checked out, and submodules are initialised shallowly.
#[must_use]
pub fn checkout_steps(uri: &str, pr_number: u64, sha: &str) -> Vec<GitStep> {
    vec![
        GitStep::new(["init"]),
        GitStep::new(["remote", "add", "origin", uri]),
        GitStep::new([
            "fetch".to_owned(),
            "--depth".to_owned(),
            "1".to_owned(),
            "origin".to_owned(),
            format!("refs/pull/{pr_number}/head:pr"),
        ]),
        GitStep::new(["checkout", sha]),
        GitStep::new(["submodule", "update", "--init", "--recursive", "--depth", "1"]),
    ]
}

/// What to check out and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest<'a> {
    /// Clone URI of the repository.
    pub uri: &'a str,
    /// Pull request whose head ref is fetched.
    pub pr_number: u64,
    /// Commit to check out.
    pub sha: &'a str,
    /// Directory that receives the working tree.
    pub destination: &'a Utf8Path,
    /// SSH key to provision before fetching.
    pub private_key: Option<&'a str>,
}

/// Clones a repository at a pull request commit.
#[derive(Debug)]
pub struct SourceFetcher<R: GitRunner> {
    runner: R,
    ssh: SshCredentials,
}

impl<R: GitRunner> SourceFetcher<R> {
    /// Creates a fetcher running git through `runner` and writing SSH
    /// credentials through `ssh`.
    #[must_use]
    pub const fn new(runner: R, ssh: SshCredentials) -> Self {
        Self { runner, ssh }
    }

    /// Checks out the requested commit into the destination directory.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Io`] when credentials or the destination
    /// cannot be written and [`ResourceError::GitStep`] naming the first git
    /// step that could not be spawned or exited non-zero.
    pub fn materialize(&self, request: &CheckoutRequest<'_>) -> Result<(), ResourceError> {
        if let Some(private_key) = request.private_key {
            self.ssh.provision(private_key)?;
        }

        ensure_directory(request.destination)?;

        for step in checkout_steps(request.uri, request.pr_number, request.sha) {
            tracing::info!(step = %step, destination = %request.destination, "running git");
            let status = self
                .runner
                .run(request.destination, step.args())
                .map_err(|error| ResourceError::GitStep {
                    step: step.to_string(),
                    detail: format!("could not start git: {error}"),
                })?;

            if !status.is_success() {
                return Err(ResourceError::GitStep {
                    step: step.to_string(),
                    detail: status.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
