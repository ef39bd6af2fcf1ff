//! Soft-conflict detection
//!
//! A PR can report as mergeable while its potential merge commit changes
//! different files (or different content) than the PR's own diff, e.g. when
//! GitHub silently resolved a conflict. Comparing the two file lists exposes
//! that.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{FileChange, PullRequest};
use tracing::{debug, info};

/// Whether two file-change lists describe different content
///
/// Lists of different length always differ, without looking at content.
/// Otherwise the lists differ iff their (filename, sha) pairs differ as sets;
/// the order in which the host returns files is not trusted.
pub fn file_changes_differ(pr_files: &[FileChange], merge_files: &[FileChange]) -> bool {
    if pr_files.len() != merge_files.len() {
        return true;
    }

    let mut left: Vec<(&str, &str)> = pr_files
        .iter()
        .map(|f| (f.filename.as_str(), f.sha.as_str()))
        .collect();
    let mut right: Vec<(&str, &str)> = merge_files
        .iter()
        .map(|f| (f.filename.as_str(), f.sha.as_str()))
        .collect();
    left.sort_unstable();
    right.sort_unstable();

    left != right
}

/// Check whether a mergeable PR's merge result differs from its visible diff
///
/// Errors (never retried): the PR has no potential merge commit, or the
/// merge commit's file list is absent.
pub async fn detect_soft_conflict(platform: &dyn PlatformService, pr: &PullRequest) -> Result<bool> {
    let merge_commit = pr
        .potential_merge_commit
        .as_deref()
        .ok_or(Error::MissingMergeCommit(pr.number))?;

    let pr_files = platform.list_pull_request_files(pr.number).await?;
    let merge_files = platform
        .list_commit_files(merge_commit)
        .await?
        .ok_or_else(|| Error::UnknownMergeDiff {
            pr_number: pr.number,
            commit: merge_commit.to_string(),
        })?;

    let changed = file_changes_differ(&pr_files, &merge_files);
    if !changed {
        debug!(pr_number = pr.number, "merge commit matches PR diff");
    } else if pr_files.len() == merge_files.len() {
        info!(pr_number = pr.number, "#{} has mismatching SHAs", pr.number);
    } else {
        info!(
            pr_number = pr.number,
            pr_files = pr_files.len(),
            merge_files = merge_files.len(),
            "#{} has a difference in the number of files",
            pr.number
        );
    }
    Ok(changed)
}
