//! The `in` command: commit metadata plus a checked-out source tree.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::config::{ResourceConfig, VersionInput};
use crate::error::ResourceError;
use crate::github::{HostingGateway, resolve_repo_name};
use crate::local::{CheckoutRequest, GitRunner, SourceFetcher};

use super::{MetadataField, VersionToken};

/// Validated input for `in`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InRequest {
    /// Clone URI of the repository.
    pub uri: String,
    /// `owner/name` path of the repository.
    pub repo: String,
    /// Version exactly as supplied, echoed back in the response.
    pub version: VersionInput,
    /// Decoded version.
    pub token: VersionToken,
    /// Directory receiving the checkout.
    pub destination: Utf8PathBuf,
    /// SSH key for the fetch.
    pub private_key: Option<String>,
}

impl InRequest {
    /// Validates the configuration for `in`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] when `source.uri` or `version`
    /// is absent, [`ResourceError::InvalidVersion`] when the version does not
    /// decode, and [`ResourceError::MissingOutputDirectory`] when no
    /// destination was given.
    pub fn from_config(
        config: &ResourceConfig,
        destination: Option<&Utf8Path>,
    ) -> Result<Self, ResourceError> {
        let uri = config.source.require_uri()?;
        let version = config
            .version
            .clone()
            .ok_or(ResourceError::MissingField {
                section: "configuration",
                field: "version",
            })?;
        let token = VersionToken::parse(version.token())?;
        let output_dir = destination.ok_or(ResourceError::MissingOutputDirectory)?;

        Ok(Self {
            uri: uri.to_owned(),
            repo: resolve_repo_name(uri),
            version,
            token,
            destination: output_dir.to_owned(),
            private_key: config.source.private_key().map(ToOwned::to_owned),
        })
    }
}

/// Output of `in`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InResponse {
    /// The version that was fetched, unchanged.
    pub version: VersionInput,
    /// Commit details in display order.
    pub metadata: Vec<MetadataField>,
}

/// Runs the `in` command.
pub struct InHandler<'client, Gateway, Runner>
where
    Gateway: HostingGateway,
    Runner: GitRunner,
{
    client: &'client Gateway,
    fetcher: &'client SourceFetcher<Runner>,
}

impl<'client, Gateway, Runner> InHandler<'client, Gateway, Runner>
where
    Gateway: HostingGateway,
    Runner: GitRunner,
{
    /// Create a handler fetching metadata through `client` and sources
    /// through `fetcher`.
    #[must_use]
    pub const fn new(client: &'client Gateway, fetcher: &'client SourceFetcher<Runner>) -> Self {
        Self { client, fetcher }
    }

    /// Fetches one commit and lists commit, author, author date, committer,
    /// committer date, and message, in that order.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn fetch_commit_metadata(
        &self,
        repo: &str,
        sha: &str,
    ) -> Result<Vec<MetadataField>, ResourceError> {
        let commit = self.client.commit(repo, sha).await?;
        Ok(vec![
            MetadataField::new("commit", commit.sha),
            MetadataField::new("author", commit.author.name_or_empty()),
            MetadataField::new("author_date", commit.author.date_or_empty()),
            MetadataField::new("committer", commit.committer.name_or_empty()),
            MetadataField::new("committer_date", commit.committer.date_or_empty()),
            MetadataField::new("message", commit.message),
        ])
    }

    /// Fetches metadata, checks the commit out, and echoes the version.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures and checkout failures.
    pub async fn run(&self, request: &InRequest) -> Result<InResponse, ResourceError> {
        let metadata = self
            .fetch_commit_metadata(&request.repo, &request.token.sha)
            .await?;

        self.fetcher.materialize(&CheckoutRequest {
            uri: &request.uri,
            pr_number: request.token.pr_number,
            sha: &request.token.sha,
            destination: &request.destination,
            private_key: request.private_key.as_deref(),
        })?;
        tracing::info!(
            version = %request.token,
            destination = %request.destination,
            "checked out pull request commit"
        );

        Ok(InResponse {
            version: request.version.clone(),
            metadata,
        })
    }
}
