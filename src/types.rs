//! Core types for conflict-labeler

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// A repository label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    /// GraphQL node ID
    pub id: String,
    /// Label name
    pub name: String,
}

/// Mergeability as reported by GitHub's `mergeable` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeableState {
    /// The PR cannot be merged due to merge conflicts
    Conflicting,
    /// The PR can be merged
    Mergeable,
    /// GitHub has not computed mergeability yet
    Unknown,
}

/// GitHub's richer `mergeStateStatus` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeStateStatus {
    /// Head ref is out of date
    Behind,
    /// Blocked by branch protection
    Blocked,
    /// Mergeable and passing
    Clean,
    /// Merge commit cannot be cleanly created
    Dirty,
    /// PR is a draft
    Draft,
    /// Mergeable with passing status and pre-receive hooks
    HasHooks,
    /// State cannot currently be determined
    Unknown,
    /// Mergeable with non-passing commit status
    Unstable,
}

/// A pull request snapshot, fetched fresh each run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// GraphQL node ID (used for mutations)
    pub id: String,
    /// PR number
    pub number: u64,
    /// Raw `mergeable` field
    pub mergeable: MergeableState,
    /// Raw `mergeStateStatus` field, when the query exposes it
    pub merge_state_status: Option<MergeStateStatus>,
    /// Object ID of the potential merge commit, once GitHub has computed one
    pub potential_merge_commit: Option<String>,
    /// Labels currently attached
    pub labels: Vec<Label>,
}

/// One file touched by a diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Blob SHA of the file after the change
    pub sha: String,
    /// Path of the file
    pub filename: String,
}

/// Canonical merge status used by the reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeStatus {
    /// Hard conflict with the base branch
    Conflicting,
    /// No conflict
    Mergeable,
    /// Not computed yet
    Unknown,
}

impl std::fmt::Display for MergeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflicting => write!(f, "conflicting"),
            Self::Mergeable => write!(f, "mergeable"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Which raw GitHub field(s) decide a PR's [`MergeStatus`]
///
/// GitHub exposes both `mergeable` and `mergeStateStatus`. The model picks
/// how those are folded into the canonical tri-state, so the rest of the
/// crate never branches on raw host values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusModel {
    /// Use `mergeable` only
    #[default]
    Mergeable,
    /// Use `mergeStateStatus` only: `DIRTY` conflicts, `UNKNOWN` is unknown,
    /// every other value (including policy gates like `BLOCKED`) is not a
    /// conflict
    MergeStateStatus,
    /// Conflicting if either field says so, unknown if either is unknown
    Combined,
}

impl StatusModel {
    /// Normalize a pull request's raw fields into a [`MergeStatus`]
    pub fn resolve(self, pr: &PullRequest) -> MergeStatus {
        match self {
            Self::Mergeable => from_mergeable(pr.mergeable),
            Self::MergeStateStatus => pr
                .merge_state_status
                .map_or(MergeStatus::Unknown, from_merge_state_status),
            Self::Combined => {
                let mergeable = from_mergeable(pr.mergeable);
                let state = pr
                    .merge_state_status
                    .map_or(MergeStatus::Mergeable, from_merge_state_status);
                match (mergeable, state) {
                    (MergeStatus::Conflicting, _) | (_, MergeStatus::Conflicting) => {
                        MergeStatus::Conflicting
                    }
                    (MergeStatus::Unknown, _) | (_, MergeStatus::Unknown) => MergeStatus::Unknown,
                    _ => MergeStatus::Mergeable,
                }
            }
        }
    }
}

const fn from_mergeable(state: MergeableState) -> MergeStatus {
    match state {
        MergeableState::Conflicting => MergeStatus::Conflicting,
        MergeableState::Mergeable => MergeStatus::Mergeable,
        MergeableState::Unknown => MergeStatus::Unknown,
    }
}

const fn from_merge_state_status(status: MergeStateStatus) -> MergeStatus {
    match status {
        MergeStateStatus::Dirty => MergeStatus::Conflicting,
        MergeStateStatus::Unknown => MergeStatus::Unknown,
        MergeStateStatus::Behind
        | MergeStateStatus::Blocked
        | MergeStateStatus::Clean
        | MergeStateStatus::Draft
        | MergeStateStatus::HasHooks
        | MergeStateStatus::Unstable => MergeStatus::Mergeable,
    }
}

impl FromStr for StatusModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "mergeable" => Ok(Self::Mergeable),
            "merge-state-status" | "merge_state_status" | "mergestatestatus" => {
                Ok(Self::MergeStateStatus)
            }
            "combined" => Ok(Self::Combined),
            other => Err(format!(
                "unknown status model '{other}' (expected mergeable, merge-state-status or combined)"
            )),
        }
    }
}

impl std::fmt::Display for StatusModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mergeable => write!(f, "mergeable"),
            Self::MergeStateStatus => write!(f, "merge-state-status"),
            Self::Combined => write!(f, "combined"),
        }
    }
}

/// Retry budget for one poll call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    /// Delay between attempts
    pub wait: Duration,
    /// Maximum number of fetches (always at least 1)
    pub max_retries: u32,
}

impl RetryBudget {
    /// Create a budget, clamping `max_retries` to at least one attempt
    pub fn new(wait: Duration, max_retries: u32) -> Self {
        Self {
            wait,
            max_retries: max_retries.max(1),
        }
    }

    /// Budget from a millisecond wait
    pub fn from_millis(wait_ms: u64, max_retries: u32) -> Self {
        Self::new(Duration::from_millis(wait_ms), max_retries)
    }
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self::from_millis(5000, 1)
    }
}

/// Repository the platform service talks to
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// REST/GraphQL API base URL (e.g. `https://api.github.com`)
    pub api_url: String,
}
