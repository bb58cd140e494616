//! HEAD lookup for an already checked-out repository.

use camino::Utf8Path;
use git2::{ErrorCode, Repository};

use crate::error::ResourceError;

/// Returns the commit SHA that HEAD points to for the repository containing
/// `path`.
///
/// The repository is discovered from `path` upwards, so a subdirectory of a
/// working tree resolves to that tree's HEAD.
///
/// # Errors
///
/// Returns [`ResourceError::NotAGitRepository`] when no repository contains
/// `path` or HEAD is missing or unborn, and [`ResourceError::Git`] for any
/// other git failure.
pub fn current_commit_sha(path: &Utf8Path) -> Result<String, ResourceError> {
    let not_a_repository = || ResourceError::NotAGitRepository {
        path: path.to_string(),
    };

    let repository = Repository::discover(path.as_std_path()).map_err(|error| {
        if error.code() == ErrorCode::NotFound {
            not_a_repository()
        } else {
            ResourceError::from(error)
        }
    })?;

    let head = repository.head().map_err(|error| match error.code() {
        ErrorCode::NotFound | ErrorCode::UnbornBranch => not_a_repository(),
        _ => ResourceError::from(error),
    })?;
    let commit = head.peel_to_commit().map_err(|error| {
        tracing::debug!(%path, error = %error, "HEAD does not point at a commit");
        not_a_repository()
    })?;

    Ok(commit.id().to_string())
}
