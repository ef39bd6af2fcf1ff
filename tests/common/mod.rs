//! Shared test fixtures

#![allow(dead_code)]

pub mod mock_platform;

pub use mock_platform::MockPlatformService;

use conflict_labeler::types::{
    FileChange, Label, MergeStateStatus, MergeableState, PlatformConfig, PullRequest,
};

/// Config for a GitHub repo used across tests
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "octo".to_string(),
        repo: "repo".to_string(),
        api_url: "https://api.github.com".to_string(),
    }
}

/// Mock platform preloaded with one label
pub fn mock_with_label(label: &Label) -> MockPlatformService {
    let mock = MockPlatformService::with_config(github_config());
    mock.set_labels(vec![label.clone()]);
    mock
}

/// Label with a predictable node ID
pub fn make_label(id: &str, name: &str) -> Label {
    Label {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Node ID used for a PR number
pub fn pr_node_id(number: u64) -> String {
    format!("PR_node_{number}")
}

/// Open PR with the given mergeability and labels
pub fn make_pr(number: u64, mergeable: MergeableState, labels: &[Label]) -> PullRequest {
    PullRequest {
        id: pr_node_id(number),
        number,
        mergeable,
        merge_state_status: None,
        potential_merge_commit: Some(format!("merge_{number}")),
        labels: labels.to_vec(),
    }
}

/// Open PR with both raw mergeability fields
pub fn make_pr_with_state(
    number: u64,
    mergeable: MergeableState,
    merge_state_status: MergeStateStatus,
) -> PullRequest {
    PullRequest {
        merge_state_status: Some(merge_state_status),
        ..make_pr(number, mergeable, &[])
    }
}

/// File change entry
pub fn file(filename: &str, sha: &str) -> FileChange {
    FileChange {
        sha: sha.to_string(),
        filename: filename.to_string(),
    }
}
