//! Discovery of the next pull request commit to build.
//!
//! GitHub's commit statuses are the only record of what has been seen: a
//! commit counts as seen once it carries a successful [`TRACKING_CONTEXT`]
//! status. `check` marks the commit it returns before answering, so the next
//! poll never rediscovers it even if the orchestrator drops the version.

use crate::config::{BuildEnvironment, ResourceConfig};
use crate::error::ResourceError;
use crate::github::{
    HostingGateway, NewStatus, PullRequest, StatusEntry, StatusState, resolve_repo_name,
};

use super::{CommitVersion, VersionToken};

/// Status context marking a commit as seen.
///
/// Changing this value hides every commit marked by earlier releases.
pub const TRACKING_CONTEXT: &str = "ci-seen";

/// Description attached to the tracking status.
pub const TRACKING_DESCRIPTION: &str = "Check to see if ci has seen this commit";

/// Validated input for `check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    /// `owner/name` path of the repository.
    pub repo: String,
    /// Base label filter.
    pub branch: Option<String>,
    /// Link attached to the tracking status.
    pub target_url: Option<String>,
}

impl CheckRequest {
    /// Validates the configuration for `check`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] when `source.uri` is absent.
    pub fn from_config(
        config: &ResourceConfig,
        environment: &BuildEnvironment,
    ) -> Result<Self, ResourceError> {
        let uri = config.source.require_uri()?;
        Ok(Self {
            repo: resolve_repo_name(uri),
            branch: config.source.branch_filter().map(ToOwned::to_owned),
            target_url: environment.external_url().map(ToOwned::to_owned),
        })
    }
}

/// A pull request together with its unseen head commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The pull request.
    pub pull_request: PullRequest,
    /// SHA of its latest commit.
    pub sha: String,
}

impl Candidate {
    /// Version token identifying this candidate.
    #[must_use]
    pub fn token(&self) -> VersionToken {
        VersionToken::new(self.pull_request.number, self.sha.clone())
    }
}

/// Whether `statuses` contain a successful tracking status.
#[must_use]
pub fn is_tracked(statuses: &[StatusEntry]) -> bool {
    statuses
        .iter()
        .any(|status| status.context == TRACKING_CONTEXT && status.state == StatusState::Success)
}

/// Runs the `check` command against a gateway.
pub struct CheckHandler<'client, Gateway>
where
    Gateway: HostingGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> CheckHandler<'client, Gateway>
where
    Gateway: HostingGateway,
{
    /// Create a handler using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Lists open pull requests, keeping only those whose base label equals
    /// `branch` when a filter is given.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn fetch_open_pull_requests(
        &self,
        repo: &str,
        branch: Option<&str>,
    ) -> Result<Vec<PullRequest>, ResourceError> {
        let mut pull_requests = self.client.open_pull_requests(repo).await?;
        if let Some(label) = branch {
            pull_requests.retain(|pull_request| pull_request.base_label == label);
        }
        tracing::debug!(repo, count = pull_requests.len(), "open pull requests");
        Ok(pull_requests)
    }

    /// Returns the SHA of the pull request's latest commit unless it has
    /// already been marked.
    ///
    /// Commits are taken in API order and the last one is treated as the
    /// latest. A pull request without commits yields `None`.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn find_untouched_commit(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<Option<String>, ResourceError> {
        let commits = self.client.pull_request_commits(repo, number).await?;
        let Some(latest) = commits.last() else {
            return Ok(None);
        };

        let statuses = self.client.commit_statuses(repo, &latest.sha).await?;
        if is_tracked(&statuses) {
            tracing::debug!(repo, number, sha = %latest.sha, "latest commit already seen");
            return Ok(None);
        }
        Ok(Some(latest.sha.clone()))
    }

    /// Returns the first pull request, in list order, with an unseen latest
    /// commit. Later pull requests are not queried once one is found.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn select_next_candidate(
        &self,
        repo: &str,
        pull_requests: &[PullRequest],
    ) -> Result<Option<Candidate>, ResourceError> {
        for pull_request in pull_requests {
            if let Some(sha) = self.find_untouched_commit(repo, pull_request.number).await? {
                return Ok(Some(Candidate {
                    pull_request: pull_request.clone(),
                    sha,
                }));
            }
        }
        Ok(None)
    }

    /// Attaches a successful tracking status to `sha`.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn mark_commit(
        &self,
        repo: &str,
        sha: &str,
        target_url: Option<&str>,
    ) -> Result<StatusEntry, ResourceError> {
        let status = NewStatus {
            state: StatusState::Success,
            context: TRACKING_CONTEXT.to_owned(),
            description: TRACKING_DESCRIPTION.to_owned(),
            target_url: target_url.map(ToOwned::to_owned),
        };
        self.client.create_status(repo, sha, &status).await
    }

    /// Finds and marks the next candidate.
    ///
    /// Returns an empty list when there is nothing new, otherwise a single
    /// `pr<N>:<sha>` version.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn run(&self, request: &CheckRequest) -> Result<Vec<CommitVersion>, ResourceError> {
        let pull_requests = self
            .fetch_open_pull_requests(&request.repo, request.branch.as_deref())
            .await?;

        let Some(candidate) = self
            .select_next_candidate(&request.repo, &pull_requests)
            .await?
        else {
            tracing::info!(repo = %request.repo, "no unseen pull request commits");
            return Ok(Vec::new());
        };

        self.mark_commit(&request.repo, &candidate.sha, request.target_url.as_deref())
            .await?;

        let token = candidate.token();
        tracing::info!(repo = %request.repo, version = %token, "marked new version");
        Ok(vec![CommitVersion {
            commit: token.to_string(),
        }])
    }
}
