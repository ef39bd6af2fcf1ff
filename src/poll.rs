//! Mergeability polling
//!
//! GitHub computes `mergeable` asynchronously and on request, so a freshly
//! pushed or freshly merged base often reports `UNKNOWN` for a while. These
//! functions refetch until every PR has a known status or the retry budget
//! runs out. Exhaustion is reported in the outcome, never raised.

use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{MergeStatus, PullRequest, RetryBudget, StatusModel};
use tracing::{debug, info, warn};

/// Result of a poll: the last fetched data plus what is still unknown
#[derive(Debug, Clone)]
pub struct PollOutcome<T> {
    /// Most recently fetched value
    pub value: T,
    /// PR numbers whose status was still unknown after the last attempt
    pub undetermined: Vec<u64>,
    /// Number of fetches performed
    pub attempts: u32,
}

impl<T> PollOutcome<T> {
    /// Whether every PR ended with a known status
    pub const fn is_complete(&self) -> bool {
        self.undetermined.is_empty()
    }
}

fn undetermined_numbers(pull_requests: &[PullRequest], model: StatusModel) -> Vec<u64> {
    pull_requests
        .iter()
        .filter(|pr| model.resolve(pr) == MergeStatus::Unknown)
        .map(|pr| pr.number)
        .collect()
}

/// Format PR numbers as `#1, #2`
pub fn format_pr_numbers(numbers: &[u64]) -> String {
    numbers
        .iter()
        .map(|n| format!("#{n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fetch all open PRs until their merge status is known
///
/// Each retry refetches the whole set, since any PR may flip between polls.
pub async fn gather_pull_requests(
    platform: &dyn PlatformService,
    model: StatusModel,
    budget: RetryBudget,
) -> Result<PollOutcome<Vec<PullRequest>>> {
    let mut attempts = 0;

    loop {
        attempts += 1;
        let pull_requests = platform.list_open_pull_requests().await?;
        let undetermined = undetermined_numbers(&pull_requests, model);
        debug!(
            attempt = attempts,
            total = pull_requests.len(),
            unknown = undetermined.len(),
            "fetched open PRs"
        );

        if undetermined.is_empty() || attempts >= budget.max_retries {
            if !undetermined.is_empty() {
                warn!(
                    attempts,
                    "Could not determine mergeable status for: {}",
                    format_pr_numbers(&undetermined)
                );
            }
            return Ok(PollOutcome {
                value: pull_requests,
                undetermined,
                attempts,
            });
        }

        info!(unknown = undetermined.len(), "...waiting for mergeable info...");
        tokio::time::sleep(budget.wait).await;
    }
}

/// Fetch a single PR until its merge status is known
///
/// `mergeable_hint` is the event payload's best-effort `mergeable` value.
/// When it is not a definite boolean, the first fetch waits `budget.wait`
/// first, because GitHub has likely only just started computing it.
pub async fn gather_pull_request(
    platform: &dyn PlatformService,
    model: StatusModel,
    pr_number: u64,
    mergeable_hint: Option<bool>,
    budget: RetryBudget,
) -> Result<PollOutcome<PullRequest>> {
    if mergeable_hint.is_none() {
        info!(pr_number, "...waiting for mergeable info...");
        tokio::time::sleep(budget.wait).await;
    }

    let mut attempts = 0;

    loop {
        attempts += 1;
        let pr = platform.get_pull_request(pr_number).await?;
        let status = model.resolve(&pr);
        debug!(pr_number, attempt = attempts, %status, "fetched PR");

        if status != MergeStatus::Unknown {
            return Ok(PollOutcome {
                value: pr,
                undetermined: Vec::new(),
                attempts,
            });
        }

        if attempts >= budget.max_retries {
            warn!(attempts, "Could not determine mergeable status for: #{pr_number}");
            return Ok(PollOutcome {
                value: pr,
                undetermined: vec![pr_number],
                attempts,
            });
        }

        info!(pr_number, "...waiting for mergeable info...");
        tokio::time::sleep(budget.wait).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pr_numbers() {
        assert_eq!(format_pr_numbers(&[2, 5]), "#2, #5");
        assert_eq!(format_pr_numbers(&[]), "");
    }
}
