//! Repository URI parsing.
//!
//! Resource sources are configured with the clone URI of a repository, in
//! either URL form (`https://github.com/owner/repo.git`,
//! `ssh://git@github.com/owner/repo.git`) or SCP-style SSH form
//! (`git@github.com:owner/repo.git`). The GitHub API wants `owner/repo`, and
//! the SSH configuration and API base need the host.

use url::Url;

/// Resolves the `owner/repo` path used in GitHub API routes.
///
/// URL-style URIs contribute their path without the leading slash. Anything
/// that does not parse as a URL with a host is treated as SCP-style and
/// contributes everything after the first colon. Every literal `.git` is then
/// removed. The function never fails; malformed input yields a best-effort
/// string.
///
/// # Examples
///
/// ```
/// use prwatch::github::resolve_repo_name;
///
/// assert_eq!(resolve_repo_name("https://github.com/hpcloud/fun.git"), "hpcloud/fun");
/// assert_eq!(resolve_repo_name("git@github.com:hpcloud/fun.git"), "hpcloud/fun");
/// ```
#[must_use]
pub fn resolve_repo_name(uri: &str) -> String {
    let raw_path = match Url::parse(uri) {
        Ok(parsed) if parsed.has_host() => parsed
            .path()
            .strip_prefix('/')
            .unwrap_or_else(|| parsed.path())
            .to_owned(),
        _ => uri
            .split_once(':')
            .map_or_else(|| uri.to_owned(), |(_, rest)| rest.to_owned()),
    };

    raw_path.replace(".git", "")
}

/// Extracts the host a repository URI points at.
///
/// Returns `None` when neither the URL form nor the SCP-style form yields a
/// non-empty host.
#[must_use]
pub fn repository_host(uri: &str) -> Option<String> {
    if let Ok(parsed) = Url::parse(uri)
        && let Some(host) = parsed.host_str()
    {
        return Some(host.to_owned());
    }

    let (authority, _) = uri.split_once(':')?;
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    if host.is_empty() || host.contains('/') {
        None
    } else {
        Some(host.to_owned())
    }
}

/// Derives the GitHub REST API base URL for a host.
///
/// `github.com` maps to the public API; any other host is assumed to be a
/// GitHub Enterprise installation serving the API under `/api/v3`.
///
/// # Errors
///
/// Returns [`crate::ResourceError::InvalidUrl`] when the host does not form a
/// valid URL.
pub fn api_base_for_host(host: &str) -> Result<Url, crate::ResourceError> {
    if host.eq_ignore_ascii_case("github.com") {
        return Url::parse("https://api.github.com")
            .map_err(|error| crate::ResourceError::InvalidUrl(error.to_string()));
    }

    let authority = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("https://{authority}"))
        .map_err(|error| crate::ResourceError::InvalidUrl(error.to_string()))?;
    api_url.set_path("api/v3");
    Ok(api_url)
}
