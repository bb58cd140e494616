//! Shared test utilities.

use std::path::PathBuf;

use tempfile::TempDir;

pub mod runtime;

/// Creates a temporary directory.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Returns the path to the built `prwatch` binary.
///
/// # Panics
///
/// Panics if the current test executable path cannot be determined.
pub fn binary_path() -> PathBuf {
    // cargo test builds binaries in target/debug
    let mut path = std::env::current_exe()
        .unwrap_or_else(|error| panic!("failed to get current exe path: {error}"));
    path.pop(); // remove test binary name
    path.pop(); // remove deps
    path.push("prwatch");
    path
}
