//! Repository detection from `owner/repo` slugs

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use url::Url;

/// Default GitHub API URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Build a [`PlatformConfig`] from an `owner/repo` slug and optional API URL
///
/// The slug format matches `GITHUB_REPOSITORY` in GitHub Actions. The API URL
/// defaults to github.com; GitHub Enterprise passes its own `GITHUB_API_URL`.
pub fn parse_repo_info(slug: &str, api_url: Option<&str>) -> Result<PlatformConfig> {
    let slug = slug.trim().trim_end_matches(".git");
    let (owner, repo) = slug
        .split_once('/')
        .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
        .ok_or_else(|| Error::InvalidRepository(format!("expected owner/repo, got '{slug}'")))?;

    let api_url = api_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(DEFAULT_API_URL);
    let parsed = Url::parse(api_url)
        .map_err(|e| Error::InvalidRepository(format!("invalid API URL '{api_url}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidRepository(format!(
            "unsupported API URL scheme: {api_url}"
        )));
    }

    Ok(PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        api_url: api_url.trim_end_matches('/').to_string(),
    })
}
