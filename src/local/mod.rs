//! Local side effects: SSH credentials, git checkouts and HEAD lookup.
//!
//! Everything that touches the filesystem or spawns git lives here so that
//! the command handlers in [`crate::resource`] can be exercised with fakes.

mod checkout;
mod fs;
mod head;
mod ssh;

pub use checkout::{
    CheckoutRequest, GitRunner, GitStep, ProcessGitRunner, SourceFetcher, StepStatus,
    checkout_steps,
};
pub use fs::ensure_directory;
pub use head::current_commit_sha;
pub use ssh::{ProvisionOutcome, SshCredentials};
