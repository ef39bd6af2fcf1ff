//! Error types for conflict-labeler

use thiserror::Error;

/// Errors produced while reconciling conflict labels
#[derive(Debug, Error)]
pub enum Error {
    /// The configured conflict label does not exist in the repository
    #[error("The label \"{0}\" was not found in your repository!")]
    LabelNotFound(String),

    /// A required input was not provided
    #[error("missing required input: {0}")]
    MissingInput(String),

    /// Repository slug could not be parsed
    #[error("invalid repository: {0}")]
    InvalidRepository(String),

    /// No usable access token
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Event payload could not be read or interpreted
    #[error("event payload error: {0}")]
    Event(String),

    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Platform failure not tied to a GitHub API response
    #[error("platform error: {0}")]
    Platform(String),

    /// A mergeable PR came back without a potential merge commit
    #[error("PR #{0} has no potential merge commit")]
    MissingMergeCommit(u64),

    /// The potential merge commit has no file list
    #[error("PR #{pr_number}: merge commit {commit} has an unknown diff")]
    UnknownMergeDiff {
        /// PR whose soft-conflict check failed
        pr_number: u64,
        /// Potential merge commit without a file list
        commit: String,
    },
}

impl From<octocrab::Error> for Error {
    fn from(e: octocrab::Error) -> Self {
        Self::GitHubApi(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::GitHubApi(e.to_string())
    }
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
