//! Data models for pull requests, commits, and commit statuses.
//!
//! The `Api*` structs mirror the GitHub REST payloads and are private to the
//! gateway; everything else is the crate's own view of that remote state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ResourceError;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Open pull request as seen during one check cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,
    /// Label of the base branch, e.g. `owner:master`.
    pub base_label: String,
}

/// Name and timestamp of a commit author or committer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitIdentity {
    /// Display name, when GitHub reports one.
    pub name: Option<String>,
    /// Authoring or committing time.
    pub date: Option<DateTime<Utc>>,
}

impl CommitIdentity {
    /// Returns the name, or an empty string.
    #[must_use]
    pub fn name_or_empty(&self) -> String {
        self.name.clone().unwrap_or_default()
    }

    /// Returns the timestamp in RFC 3339 form, or an empty string.
    #[must_use]
    pub fn date_or_empty(&self) -> String {
        self.date
            .map(|date| date.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default()
    }
}

/// Commit metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Commit SHA.
    pub sha: String,
    /// Author identity.
    pub author: CommitIdentity,
    /// Committer identity.
    pub committer: CommitIdentity,
    /// Full commit message.
    pub message: String,
}

/// State of a commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    /// The check passed.
    Success,
    /// The check failed.
    Failure,
    /// The check is still running.
    Pending,
    /// The check could not complete.
    Error,
}

impl StatusState {
    /// Returns the API value for this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Pending => "pending",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusState {
    type Err = ResourceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "success" => Ok(Self::Success),
            "failure" => Ok(Self::Failure),
            "pending" => Ok(Self::Pending),
            "error" => Ok(Self::Error),
            _ => Err(ResourceError::InvalidStatusState {
                value: value.to_owned(),
            }),
        }
    }
}

/// A status attached to a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Name of the check that wrote the status.
    pub context: String,
    /// Reported state.
    pub state: StatusState,
    /// Short human-readable description.
    pub description: Option<String>,
    /// Link shown next to the status.
    pub target_url: Option<String>,
}

/// Payload for creating a commit status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStatus {
    /// State to report.
    pub state: StatusState,
    /// Check name the status is filed under.
    pub context: String,
    /// Short human-readable description.
    pub description: String,
    /// Link shown next to the status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequest {
    pub(crate) number: u64,
    pub(crate) base: ApiBranch,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiBranch {
    #[serde(default)]
    pub(crate) label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommit {
    pub(crate) sha: String,
    pub(crate) commit: ApiCommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommitDetail {
    pub(crate) author: Option<ApiCommitIdentity>,
    pub(crate) committer: Option<ApiCommitIdentity>,
    #[serde(default)]
    pub(crate) message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommitIdentity {
    pub(crate) name: Option<String>,
    pub(crate) date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiStatus {
    #[serde(default)]
    pub(crate) context: String,
    pub(crate) state: StatusState,
    pub(crate) description: Option<String>,
    pub(crate) target_url: Option<String>,
}

impl From<ApiPullRequest> for PullRequest {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.number,
            base_label: value.base.label,
        }
    }
}

impl From<ApiCommitIdentity> for CommitIdentity {
    fn from(value: ApiCommitIdentity) -> Self {
        Self {
            name: value.name,
            date: value.date,
        }
    }
}

impl From<ApiCommit> for Commit {
    fn from(value: ApiCommit) -> Self {
        Self {
            sha: value.sha,
            author: value.commit.author.map(Into::into).unwrap_or_default(),
            committer: value.commit.committer.map(Into::into).unwrap_or_default(),
            message: value.commit.message,
        }
    }
}

impl From<ApiStatus> for StatusEntry {
    fn from(value: ApiStatus) -> Self {
        Self {
            context: value.context,
            state: value.state,
            description: value.description,
            target_url: value.target_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::{ApiCommit, Commit, CommitIdentity, StatusState};
    use crate::error::ResourceError;

    #[rstest]
    #[case("success", StatusState::Success)]
    #[case("failure", StatusState::Failure)]
    #[case("pending", StatusState::Pending)]
    #[case("error", StatusState::Error)]
    fn parses_status_states(#[case] raw: &str, #[case] expected: StatusState) {
        let parsed: StatusState = raw.parse().expect("state should parse");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), raw);
    }

    #[rstest]
    fn rejects_unknown_status_state() {
        let result = "SUCCESS".parse::<StatusState>();
        assert_eq!(
            result,
            Err(ResourceError::InvalidStatusState {
                value: "SUCCESS".to_owned()
            })
        );
    }

    #[rstest]
    fn commit_payload_without_identities_uses_defaults() {
        let api: ApiCommit = serde_json::from_value(serde_json::json!({
            "sha": "abcdef",
            "commit": { "author": null, "committer": null, "message": "msg" }
        }))
        .expect("payload should deserialise");

        let commit = Commit::from(api);
        assert_eq!(commit.sha, "abcdef");
        assert_eq!(commit.author, CommitIdentity::default());
        assert_eq!(commit.author.name_or_empty(), "");
        assert_eq!(commit.author.date_or_empty(), "");
    }

    #[rstest]
    fn identity_dates_render_as_rfc3339() {
        let identity = CommitIdentity {
            name: Some("author name".to_owned()),
            date: Utc.with_ymd_and_hms(2001, 1, 1, 1, 1, 1).single(),
        };
        assert_eq!(identity.date_or_empty(), "2001-01-01T01:01:01Z");
    }
}
