//! JSON responses on stdout.

use std::io::{self, Write};

use prwatch::ResourceError;
use serde::Serialize;

/// Writes `value` as one line of JSON to stdout.
pub fn write_response<T: Serialize>(value: &T) -> Result<(), ResourceError> {
    let mut stdout = io::stdout().lock();
    write_response_to(&mut stdout, value)
}

/// Writes `value` as one line of JSON to the given writer.
pub fn write_response_to<W: Write, T: Serialize>(
    writer: &mut W,
    value: &T,
) -> Result<(), ResourceError> {
    let body = serde_json::to_string(value).map_err(|error| ResourceError::Io {
        message: format!("failed to encode response: {error}"),
    })?;
    writeln!(writer, "{body}").map_err(|error| ResourceError::Io {
        message: error.to_string(),
    })
}
