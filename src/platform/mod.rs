//! Platform services for GitHub
//!
//! Provides the repository operations the reconciliation engine consumes.

mod detection;
mod github;

pub use detection::parse_repo_info;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{FileChange, Label, PlatformConfig, PullRequest};
use async_trait::async_trait;

/// Platform service trait for label reconciliation
///
/// The reconciliation engine only talks to the repository through this
/// trait, so tests can substitute a mock and alternative hosts can plug in.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Search repository labels by name (substring match, host-defined)
    ///
    /// Callers must perform exact-name matching on the result.
    async fn find_labels(&self, query: &str) -> Result<Vec<Label>>;

    /// Fetch every open PR, following pagination internally
    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequest>>;

    /// Fetch a single PR by number
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest>;

    /// Attach a label to a labelable subject (PR node ID)
    async fn add_label(&self, label_id: &str, subject_id: &str) -> Result<()>;

    /// Detach a label from a labelable subject (PR node ID)
    async fn remove_label(&self, label_id: &str, subject_id: &str) -> Result<()>;

    /// List the files changed by a PR, in host order
    async fn list_pull_request_files(&self, pr_number: u64) -> Result<Vec<FileChange>>;

    /// List the files changed by a commit, in host order
    ///
    /// Returns `None` when the host response carries no file list.
    async fn list_commit_files(&self, commit_ref: &str) -> Result<Option<Vec<FileChange>>>;

    /// Post a comment on a commentable subject (PR node ID)
    async fn create_comment(&self, subject_id: &str, body: &str) -> Result<()>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
