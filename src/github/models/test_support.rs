//! Test helpers for constructing model fixtures.
//!
//! # Examples
//!
//! ```
//! use prwatch::github::models::StatusState;
//! use prwatch::github::models::test_support::{pull_request, status};
//!
//! let pr = pull_request(57, "hpcloud:master");
//! assert_eq!(pr.number, 57);
//!
//! let seen = status("ci-seen", StatusState::Success);
//! assert_eq!(seen.context, "ci-seen");
//! ```

use chrono::{TimeZone, Utc};

use super::{Commit, CommitIdentity, PullRequest, StatusEntry, StatusState};

/// Constructs a pull request with the given number and base label.
#[must_use]
pub fn pull_request(number: u64, base_label: &str) -> PullRequest {
    PullRequest {
        number,
        base_label: base_label.to_owned(),
    }
}

/// Constructs a commit with only the SHA set.
#[must_use]
pub fn commit(sha: &str) -> Commit {
    Commit {
        sha: sha.to_owned(),
        author: CommitIdentity::default(),
        committer: CommitIdentity::default(),
        message: String::new(),
    }
}

/// Constructs a fully populated commit dated 2001-01-01T01:01:01Z.
#[must_use]
pub fn detailed_commit(sha: &str) -> Commit {
    let date = Utc.with_ymd_and_hms(2001, 1, 1, 1, 1, 1).single();
    Commit {
        sha: sha.to_owned(),
        author: CommitIdentity {
            name: Some("author name".to_owned()),
            date,
        },
        committer: CommitIdentity {
            name: Some("committer name".to_owned()),
            date,
        },
        message: "commit message".to_owned(),
    }
}

/// Constructs a status entry with no description or link.
#[must_use]
pub fn status(context: &str, state: StatusState) -> StatusEntry {
    StatusEntry {
        context: context.to_owned(),
        state,
        description: None,
        target_url: None,
    }
}
