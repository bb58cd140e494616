//! Gateway for the GitHub calls the resource makes.
//!
//! The trait keeps the command handlers independent of the HTTP client so
//! that they can be exercised against mocks, while [`OctocrabGateway`]
//! performs the real requests.

mod error_mapping;
mod octocrab_gateway;

pub use octocrab_gateway::OctocrabGateway;

use async_trait::async_trait;

use crate::error::ResourceError;
use crate::github::models::{Commit, NewStatus, PullRequest, StatusEntry};

/// Remote operations against the repository hosting API.
///
/// Every `repo` argument is an `owner/name` path as produced by
/// [`crate::github::resolve_repo_name`]. List operations return every page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostingGateway: Send + Sync {
    /// List every open pull request in API order.
    async fn open_pull_requests(&self, repo: &str) -> Result<Vec<PullRequest>, ResourceError>;

    /// List the commits of a pull request in API order.
    async fn pull_request_commits(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Commit>, ResourceError>;

    /// List the statuses attached to a commit.
    async fn commit_statuses(
        &self,
        repo: &str,
        sha: &str,
    ) -> Result<Vec<StatusEntry>, ResourceError>;

    /// Attach a new status to a commit.
    async fn create_status(
        &self,
        repo: &str,
        sha: &str,
        status: &NewStatus,
    ) -> Result<StatusEntry, ResourceError>;

    /// Fetch a single commit.
    async fn commit(&self, repo: &str, sha: &str) -> Result<Commit, ResourceError>;
}
