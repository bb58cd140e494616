//! Unit tests for resource configuration.
//!
//! - `document_loading`: parsing the stdin document
//! - `field_resolution`: required fields, defaults, and API base derivation
//! - `build_environment`: target URL construction from the environment

mod document_loading;
