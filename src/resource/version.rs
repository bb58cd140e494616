//! The `pr<N>:<sha>` version token threaded from `check` to `in`.

use std::fmt;
use std::str::FromStr;

use crate::error::ResourceError;

/// Identifies one pull request commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionToken {
    /// Pull request number.
    pub pr_number: u64,
    /// Commit SHA within the pull request.
    pub sha: String,
}

impl VersionToken {
    /// Creates a token for `sha` on pull request `pr_number`.
    #[must_use]
    pub fn new(pr_number: u64, sha: impl Into<String>) -> Self {
        Self {
            pr_number,
            sha: sha.into(),
        }
    }

    /// Decodes a `pr<N>:<sha>` token.
    ///
    /// The `pr` prefix is optional; everything after the first colon is the
    /// SHA.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidVersion`] when the colon is missing,
    /// the number does not parse, or the SHA is empty.
    pub fn parse(token: &str) -> Result<Self, ResourceError> {
        let invalid = || ResourceError::InvalidVersion {
            version: token.to_owned(),
        };

        let (number, sha) = token.split_once(':').ok_or_else(invalid)?;
        let digits = number.strip_prefix("pr").unwrap_or(number);
        let pr_number = digits.parse::<u64>().map_err(|_| invalid())?;
        if sha.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(pr_number, sha))
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pr{}:{}", self.pr_number, self.sha)
    }
}

impl FromStr for VersionToken {
    type Err = ResourceError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::parse(token)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::VersionToken;
    use crate::error::ResourceError;

    #[rstest]
    #[case::canonical("pr58:fecdba", 58, "fecdba")]
    #[case::without_prefix("7:abc123", 7, "abc123")]
    #[case::zero("pr0:a", 0, "a")]
    fn decodes_tokens(#[case] token: &str, #[case] number: u64, #[case] sha: &str) {
        let parsed = VersionToken::parse(token).expect("token should parse");
        assert_eq!(parsed, VersionToken::new(number, sha));
    }

    #[rstest]
    #[case::no_colon("pr58")]
    #[case::empty_sha("pr58:")]
    #[case::not_a_number("prX:abc")]
    #[case::negative("pr-1:abc")]
    #[case::empty("")]
    fn rejects_malformed_tokens(#[case] token: &str) {
        let error = VersionToken::parse(token).expect_err("token should be rejected");
        assert_eq!(
            error,
            ResourceError::InvalidVersion {
                version: token.to_owned()
            }
        );
    }

    #[rstest]
    #[case(58, "fecdba")]
    #[case(1, "0123456789abcdef0123456789abcdef01234567")]
    #[case(u64::MAX, "x")]
    fn display_output_parses_back(#[case] number: u64, #[case] sha: &str) {
        let token = VersionToken::new(number, sha);
        let encoded = token.to_string();
        assert_eq!(encoded, format!("pr{number}:{sha}"));
        assert_eq!(encoded.parse::<VersionToken>(), Ok(token));
    }
}
