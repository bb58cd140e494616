//! Octocrab implementation of the hosting gateway.

use async_trait::async_trait;
use http::Uri;
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ResourceError;
use crate::github::models::{
    ApiCommit, ApiPullRequest, ApiStatus, Commit, NewStatus, PullRequest, StatusEntry,
};
use crate::github::token::PersonalAccessToken;

use super::HostingGateway;
use super::error_mapping::map_octocrab_error;

/// Largest page size GitHub accepts for list endpoints.
const PER_PAGE: &str = "100";

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an authenticated gateway talking to `api_base`.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::InvalidUrl` when the base URI cannot be parsed
    /// or `ResourceError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &Url) -> Result<Self, ResourceError> {
        let base_uri: Uri = api_base
            .as_str()
            .parse()
            .map_err(|error: http::uri::InvalidUri| ResourceError::InvalidUrl(error.to_string()))?;

        let client = Octocrab::builder()
            .personal_token(token.value())
            .base_uri(base_uri)
            .map_err(|error| map_octocrab_error("configure client", &error))?
            .build()
            .map_err(|error| map_octocrab_error("build client", &error))?;
        Ok(Self::new(client))
    }

    async fn all_pages<T: DeserializeOwned>(
        &self,
        operation: &str,
        route: String,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ResourceError> {
        let first_page = self
            .client
            .get::<Page<T>, _, _>(route, Some(query))
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        self.client
            .all_pages(first_page)
            .await
            .map_err(|error| map_octocrab_error(operation, &error))
    }
}

#[async_trait]
impl HostingGateway for OctocrabGateway {
    async fn open_pull_requests(&self, repo: &str) -> Result<Vec<PullRequest>, ResourceError> {
        let pulls: Vec<ApiPullRequest> = self
            .all_pages(
                "list pull requests",
                format!("/repos/{repo}/pulls"),
                &[("state", "open"), ("per_page", PER_PAGE)],
            )
            .await?;
        tracing::debug!(repo, count = pulls.len(), "listed open pull requests");
        Ok(pulls.into_iter().map(PullRequest::from).collect())
    }

    async fn pull_request_commits(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Commit>, ResourceError> {
        let commits: Vec<ApiCommit> = self
            .all_pages(
                "list pull request commits",
                format!("/repos/{repo}/pulls/{number}/commits"),
                &[("per_page", PER_PAGE)],
            )
            .await?;
        Ok(commits.into_iter().map(Commit::from).collect())
    }

    async fn commit_statuses(
        &self,
        repo: &str,
        sha: &str,
    ) -> Result<Vec<StatusEntry>, ResourceError> {
        let statuses: Vec<ApiStatus> = self
            .all_pages(
                "list commit statuses",
                format!("/repos/{repo}/commits/{sha}/statuses"),
                &[("per_page", PER_PAGE)],
            )
            .await?;
        Ok(statuses.into_iter().map(StatusEntry::from).collect())
    }

    async fn create_status(
        &self,
        repo: &str,
        sha: &str,
        status: &NewStatus,
    ) -> Result<StatusEntry, ResourceError> {
        let created: ApiStatus = self
            .client
            .post(format!("/repos/{repo}/statuses/{sha}"), Some(status))
            .await
            .map_err(|error| map_octocrab_error("create status", &error))?;
        Ok(created.into())
    }

    async fn commit(&self, repo: &str, sha: &str) -> Result<Commit, ResourceError> {
        self.client
            .get::<ApiCommit, _, _>(format!("/repos/{repo}/commits/{sha}"), None::<&()>)
            .await
            .map(Commit::from)
            .map_err(|error| map_octocrab_error("get commit", &error))
    }
}
