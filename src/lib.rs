//! `prwatch` library crate: a CI resource that turns GitHub pull request
//! commits into pipeline versions.
//!
//! The resource speaks the orchestrator's three-command protocol. `check`
//! finds the newest unseen commit of an open pull request and marks it with a
//! commit status, `in` checks that commit out, and `out` reports a build
//! result back as another commit status. Configuration arrives as JSON on
//! stdin and responses are written as JSON to stdout.

pub mod config;
pub mod error;
pub mod github;
pub mod local;
pub mod resource;
pub mod telemetry;

pub use config::{BuildEnvironment, ResourceConfig};
pub use error::ResourceError;
pub use github::{HostingGateway, OctocrabGateway, PersonalAccessToken, resolve_repo_name};
pub use resource::{CheckHandler, InHandler, OutHandler, VersionToken};
