//! Authentication for GitHub
//!
//! Supports explicit action inputs, environment variables and the `gh` CLI.

mod github;

pub use github::{GitHubAuthConfig, get_github_auth};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed explicitly (flag or `INPUT_GITHUB_TOKEN`)
    Input,
    /// Token from environment variable
    EnvVar,
    /// Token from CLI tool (gh)
    Cli,
}
