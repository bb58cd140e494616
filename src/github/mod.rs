//! GitHub access for the resource.
//!
//! This module resolves repository names from clone URIs, wraps Octocrab
//! behind the [`HostingGateway`] trait, and maps GitHub payloads into the
//! crate's own models. Errors are mapped into [`crate::ResourceError`]
//! variants so that callers never see Octocrab internals.

pub mod gateway;
pub mod models;
mod repo_name;
mod token;

pub use gateway::{HostingGateway, OctocrabGateway};
pub use models::{Commit, CommitIdentity, NewStatus, PullRequest, StatusEntry, StatusState};
pub use repo_name::{api_base_for_host, repository_host, resolve_repo_name};
pub use token::PersonalAccessToken;

#[cfg(test)]
pub use gateway::MockHostingGateway;
