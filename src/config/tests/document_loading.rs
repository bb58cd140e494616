//! Tests for `ResourceConfig::from_reader`.

use rstest::rstest;

use crate::config::{ResourceConfig, VersionInput};
use crate::error::ResourceError;

#[rstest]
fn loads_full_document() {
    let input = r#"{
        "source": {
            "uri": "git@github.com:hpcloud/fun.git",
            "branch": "hpcloud:develop",
            "access_token": "token"
        },
        "version": { "commit": "pr58:fecdba" },
        "params": { "path": "repo", "state": "success" }
    }"#;

    let config = ResourceConfig::from_reader(input.as_bytes()).expect("document should load");

    assert_eq!(
        config.source.uri.as_deref(),
        Some("git@github.com:hpcloud/fun.git")
    );
    assert_eq!(config.source.branch_filter(), Some("hpcloud:develop"));
    assert_eq!(
        config.version,
        Some(VersionInput::Commit {
            commit: "pr58:fecdba".to_owned()
        })
    );
    let params = config.params.expect("params should be present");
    assert_eq!(params.path.as_deref(), Some("repo"));
    assert_eq!(params.state.as_deref(), Some("success"));
}

#[rstest]
fn accepts_bare_string_version() {
    let input = r#"{ "source": {}, "version": "pr5:abcdef" }"#;

    let config = ResourceConfig::from_reader(input.as_bytes()).expect("document should load");

    let version = config.version.expect("version should be present");
    assert_eq!(version, VersionInput::Token("pr5:abcdef".to_owned()));
    assert_eq!(version.token(), "pr5:abcdef");
}

#[rstest]
fn version_shape_is_preserved_when_serialised() {
    let object = VersionInput::Commit {
        commit: "pr5:abcdef".to_owned(),
    };
    let bare = VersionInput::Token("pr5:abcdef".to_owned());

    assert_eq!(
        serde_json::to_value(&object).expect("should serialise"),
        serde_json::json!({ "commit": "pr5:abcdef" })
    );
    assert_eq!(
        serde_json::to_value(&bare).expect("should serialise"),
        serde_json::json!("pr5:abcdef")
    );
}

#[rstest]
fn missing_sections_default_to_empty() {
    let config = ResourceConfig::from_reader("{}".as_bytes()).expect("document should load");
    assert_eq!(config, ResourceConfig::default());
}

#[rstest]
#[case::empty("")]
#[case::whitespace("  \n ")]
fn rejects_empty_input(#[case] input: &str) {
    let result = ResourceConfig::from_reader(input.as_bytes());
    assert!(
        matches!(result, Err(ResourceError::MissingConfiguration { .. })),
        "expected MissingConfiguration, got {result:?}"
    );
}

#[rstest]
#[case::number("42")]
#[case::array("[1, 2]")]
#[case::string("\"source\"")]
fn rejects_non_object_documents(#[case] input: &str) {
    let result = ResourceConfig::from_reader(input.as_bytes());
    match result {
        Err(ResourceError::InvalidConfiguration { message }) => {
            assert!(message.contains("not an object"), "unexpected: {message}");
        }
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
}

#[rstest]
fn rejects_malformed_json() {
    let result = ResourceConfig::from_reader("{ \"source\": ".as_bytes());
    assert!(
        matches!(result, Err(ResourceError::InvalidConfiguration { .. })),
        "expected InvalidConfiguration, got {result:?}"
    );
}
