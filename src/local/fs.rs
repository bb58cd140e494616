//! Directory helpers built on capability-based file access.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::ResourceError;

/// Creates `path` and any missing parents, returning a handle to it.
///
/// The path is resolved by the operating system, so symlinked parents and
/// `..` components behave as they do for `mkdir -p`.
///
/// # Errors
///
/// Returns [`ResourceError::Io`] when a directory cannot be created or
/// opened.
pub fn ensure_directory(path: &Utf8Path) -> Result<Dir, ResourceError> {
    Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|error| {
        ResourceError::Io {
            message: format!("failed to create directory '{path}': {error}"),
        }
    })?;
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|error| ResourceError::Io {
        message: format!("failed to open directory '{path}': {error}"),
    })
}
