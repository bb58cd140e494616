//! Translation of Octocrab failures into [`ResourceError`].

use http::StatusCode;

use crate::error::ResourceError;

/// Maps a failed Octocrab call made for `operation`.
///
/// GitHub answers of 401 and 403 become authentication errors, transport
/// failures become network errors, and everything else is an API error.
pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ResourceError {
    match error {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code;
            let message = format!("{operation}: {status} {}", source.message);
            match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ResourceError::Authentication { message }
                }
                _ => ResourceError::Api { message },
            }
        }
        octocrab::Error::Http { .. }
        | octocrab::Error::Hyper { .. }
        | octocrab::Error::Service { .. } => ResourceError::Network {
            message: format!("{operation}: {error}"),
        },
        _ => ResourceError::Api {
            message: format!("{operation}: {error}"),
        },
    }
}
