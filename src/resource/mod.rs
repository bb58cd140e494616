//! The three commands of the resource.
//!
//! * [`CheckHandler`] finds the next pull request commit that has not been
//!   seen, marks it, and reports it as a new version.
//! * [`InHandler`] fetches a version's commit metadata and checks the commit
//!   out into a directory.
//! * [`OutHandler`] posts a build status for the HEAD of a checked-out tree.
//!
//! Each command first turns the stdin document into a typed request; no
//! remote call is made until that validation succeeds.

mod check;
mod fetch;
mod report;
mod version;

use serde::Serialize;

pub use check::{
    Candidate, CheckHandler, CheckRequest, TRACKING_CONTEXT, TRACKING_DESCRIPTION, is_tracked,
};
pub use fetch::{InHandler, InRequest, InResponse};
pub use report::{DEFAULT_CONTEXT, OutHandler, OutRequest, OutResponse};
pub use version::VersionToken;

/// A version entry as emitted on stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitVersion {
    /// Encoded version.
    pub commit: String,
}

/// A `{ name, value }` pair shown by the orchestrator next to a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataField {
    /// Field label.
    pub name: &'static str,
    /// Field value, empty when unknown.
    pub value: String,
}

impl MetadataField {
    fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}
