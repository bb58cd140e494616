//! Error type shared by every resource command.

use thiserror::Error;

/// Errors surfaced while loading configuration, talking to GitHub, or
/// driving git.
///
/// Every variant is fatal for the current invocation: the binary prints the
/// message to stderr and exits with a failure status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResourceError {
    /// Nothing usable was read from the configuration channel.
    #[error("failed to load configuration from stdin: {message}")]
    MissingConfiguration {
        /// Detail about what was read.
        message: String,
    },

    /// The configuration document could not be interpreted.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Parser or shape error detail.
        message: String,
    },

    /// A required configuration field was absent.
    #[error("{section} is missing {field}")]
    MissingField {
        /// Top-level configuration section (`source` or `params`).
        section: &'static str,
        /// Name of the absent field.
        field: &'static str,
    },

    /// A required environment variable was absent.
    #[error("environment is missing {name}")]
    MissingEnvironment {
        /// Variable name.
        name: &'static str,
    },

    /// The `in` command was run without a destination directory.
    #[error("output directory not supplied")]
    MissingOutputDirectory,

    /// The version token could not be decoded.
    #[error("version must look like pr<number>:<sha>, got {version:?}")]
    InvalidVersion {
        /// The rejected token.
        version: String,
    },

    /// The requested status state is not one GitHub accepts.
    #[error("state must be one of success, failure, pending, error; got {value:?}")]
    InvalidStatusState {
        /// The rejected value.
        value: String,
    },

    /// The access token was blank.
    #[error("access token is required")]
    MissingToken,

    /// A URL (repository URI or API base) could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// GitHub rejected the credentials.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// Message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response detail from GitHub.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// A git checkout step could not be run or exited non-zero.
    #[error("git step `{step}` failed: {detail}")]
    GitStep {
        /// The git command line of the failing step.
        step: String,
        /// Exit status or spawn failure.
        detail: String,
    },

    /// The path has no repository or the repository has no HEAD.
    #[error("either {path} is not a git repository, or it has no HEAD")]
    NotAGitRepository {
        /// Path that was inspected.
        path: String,
    },

    /// Reading local repository state failed for another reason.
    #[error("git error: {message}")]
    Git {
        /// Error detail from the git2 library.
        message: String,
    },
}

impl From<git2::Error> for ResourceError {
    fn from(error: git2::Error) -> Self {
        Self::Git {
            message: error.message().to_owned(),
        }
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidConfiguration {
            message: error.to_string(),
        }
    }
}
