//! GitHub token resolution

use super::AuthSource;
use crate::error::{Error, Result};
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for a token, in order
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Access token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// Resolve a GitHub token
///
/// Order: explicit input, `GITHUB_TOKEN`/`GH_TOKEN`, then `gh auth token`.
/// Blank values are treated as unset.
pub async fn get_github_auth(explicit: Option<&str>) -> Result<GitHubAuthConfig> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        debug!("using explicit GitHub token");
        return Ok(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::Input,
        });
    }

    for var in TOKEN_ENV_VARS {
        if let Ok(token) = std::env::var(var)
            && !token.trim().is_empty()
        {
            debug!(var, "using GitHub token from environment");
            return Ok(GitHubAuthConfig {
                token: token.trim().to_string(),
                source: AuthSource::EnvVar,
            });
        }
    }

    if let Some(token) = gh_cli_token().await {
        debug!("using GitHub token from gh CLI");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    Err(Error::Auth(
        "no GitHub token found; pass --github-token or set GITHUB_TOKEN".to_string(),
    ))
}

async fn gh_cli_token() -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8(output.stdout).ok()?;
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
