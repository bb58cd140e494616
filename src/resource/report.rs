//! The `out` command: report a build outcome as a commit status.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::config::{BuildEnvironment, OutParams, ResourceConfig};
use crate::error::ResourceError;
use crate::github::{HostingGateway, NewStatus, StatusState, resolve_repo_name};
use crate::local::current_commit_sha;

use super::{CommitVersion, MetadataField};

/// Status context used when `params.context` is not given.
pub const DEFAULT_CONTEXT: &str = "concourse";

/// Validated input for `out`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutRequest {
    /// `owner/name` path of the repository.
    pub repo: String,
    /// Checked-out tree whose HEAD receives the status.
    pub path: Utf8PathBuf,
    /// Status to post.
    pub status: NewStatus,
}

impl OutRequest {
    /// Validates the configuration and build environment for `out`.
    ///
    /// A relative `params.path` is resolved against `sources` when given.
    ///
    /// # Errors
    ///
    /// Checks, in order, `source.uri`, `params.path`, and `params.state`
    /// (returning [`ResourceError::MissingField`] or
    /// [`ResourceError::InvalidStatusState`]), then the build environment
    /// ([`ResourceError::MissingEnvironment`]).
    pub fn from_config(
        config: &ResourceConfig,
        environment: &BuildEnvironment,
        sources: Option<&Utf8Path>,
    ) -> Result<Self, ResourceError> {
        let uri = config.source.require_uri()?;
        let empty = OutParams::default();
        let params = config.params.as_ref().unwrap_or(&empty);

        let raw_path = Utf8Path::new(required_param(params.path.as_deref(), "path")?);
        let state: StatusState = required_param(params.state.as_deref(), "state")?.parse()?;
        let target_url = environment.target_url()?;

        let path = match sources {
            Some(base) if raw_path.is_relative() => base.join(raw_path),
            _ => raw_path.to_owned(),
        };

        Ok(Self {
            repo: resolve_repo_name(uri),
            path,
            status: NewStatus {
                state,
                context: params
                    .context
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CONTEXT.to_owned()),
                description: params.description.clone().unwrap_or_default(),
                target_url: Some(target_url),
            },
        })
    }
}

fn required_param<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, ResourceError> {
    value
        .filter(|inner| !inner.trim().is_empty())
        .ok_or(ResourceError::MissingField {
            section: "params",
            field,
        })
}

/// Output of `out`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutResponse {
    /// The commit that received the status.
    pub version: CommitVersion,
    /// State, context, and link of the posted status.
    pub metadata: Vec<MetadataField>,
}

/// Runs the `out` command against a gateway.
pub struct OutHandler<'client, Gateway>
where
    Gateway: HostingGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> OutHandler<'client, Gateway>
where
    Gateway: HostingGateway,
{
    /// Create a handler using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Posts the requested status on the HEAD commit of `request.path`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotAGitRepository`] when the path is not
    /// inside a repository or has no HEAD, [`ResourceError::Git`] when git
    /// fails otherwise, and propagates gateway failures.
    pub async fn run(&self, request: &OutRequest) -> Result<OutResponse, ResourceError> {
        let sha = current_commit_sha(&request.path)?;
        let created = self
            .client
            .create_status(&request.repo, &sha, &request.status)
            .await?;
        tracing::info!(
            repo = %request.repo,
            sha = %sha,
            state = %created.state,
            context = %created.context,
            "posted commit status"
        );

        Ok(OutResponse {
            version: CommitVersion { commit: sha },
            metadata: vec![
                MetadataField::new("state", created.state.as_str()),
                MetadataField::new("context", created.context),
                MetadataField::new("target_url", created.target_url.unwrap_or_default()),
            ],
        })
    }
}
