//! Run triggers derived from the GitHub Actions event
//!
//! Pull request events reconcile just that PR; every other event (push,
//! schedule, workflow_dispatch, ...) reconciles all open PRs.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Event names that scope a run to a single PR
const PULL_REQUEST_EVENTS: [&str; 2] = ["pull_request", "pull_request_target"];

/// What a run should reconcile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Every open PR
    All,
    /// One PR from a pull request event
    PullRequest {
        /// PR number
        number: u64,
        /// Payload's `mergeable` value (`None` when GitHub sent null)
        mergeable_hint: Option<bool>,
    },
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all open pull requests"),
            Self::PullRequest { number, .. } => write!(f, "pull request #{number}"),
        }
    }
}

#[derive(Deserialize)]
struct PullRequestEvent {
    number: Option<u64>,
    pull_request: Option<PayloadPullRequest>,
}

#[derive(Deserialize)]
struct PayloadPullRequest {
    number: Option<u64>,
    mergeable: Option<bool>,
}

impl Trigger {
    /// Whether an event name scopes the run to one PR
    pub fn is_pull_request_event(event_name: &str) -> bool {
        PULL_REQUEST_EVENTS.contains(&event_name)
    }

    /// Build a trigger from `GITHUB_EVENT_NAME` and `GITHUB_EVENT_PATH`
    ///
    /// The payload is only read for pull request events.
    pub fn from_event(event_name: Option<&str>, payload_path: Option<&Path>) -> Result<Self> {
        let Some(event_name) = event_name.filter(|n| Self::is_pull_request_event(n)) else {
            return Ok(Self::All);
        };

        let path = payload_path.ok_or_else(|| {
            Error::Event(format!("{event_name} event without an event payload path"))
        })?;
        let payload = fs::read_to_string(path)
            .map_err(|e| Error::Event(format!("failed to read {}: {e}", path.display())))?;

        Self::from_payload(event_name, &payload)
    }

    /// Build a trigger from an event name and raw JSON payload
    pub fn from_payload(event_name: &str, payload: &str) -> Result<Self> {
        if !Self::is_pull_request_event(event_name) {
            return Ok(Self::All);
        }

        let event: PullRequestEvent = serde_json::from_str(payload)
            .map_err(|e| Error::Event(format!("failed to parse {event_name} payload: {e}")))?;

        let pr_number = event.pull_request.as_ref().and_then(|pr| pr.number);
        let number = pr_number.or(event.number).ok_or_else(|| {
            Error::Event(format!("{event_name} payload has no pull request number"))
        })?;
        let mergeable_hint = event.pull_request.and_then(|pr| pr.mergeable);

        Ok(Self::PullRequest {
            number,
            mergeable_hint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_event_reconciles_all() {
        assert_eq!(Trigger::from_payload("push", "{}").unwrap(), Trigger::All);
        assert_eq!(Trigger::from_event(None, None).unwrap(), Trigger::All);
    }

    #[test]
    fn test_pull_request_event_with_null_mergeable() {
        let payload = r#"{
            "action": "opened",
            "number": 2,
            "pull_request": { "number": 2, "node_id": "MDExOlB1bGxSZXF1ZXN0Mjc5MTQ3NDM3", "mergeable": null }
        }"#;
        assert_eq!(
            Trigger::from_payload("pull_request", payload).unwrap(),
            Trigger::PullRequest {
                number: 2,
                mergeable_hint: None
            }
        );
    }

    #[test]
    fn test_pull_request_target_with_known_mergeable() {
        let payload = r#"{ "number": 9, "pull_request": { "number": 9, "mergeable": false } }"#;
        assert_eq!(
            Trigger::from_payload("pull_request_target", payload).unwrap(),
            Trigger::PullRequest {
                number: 9,
                mergeable_hint: Some(false)
            }
        );
    }

    #[test]
    fn test_pull_request_event_without_number_fails() {
        let result = Trigger::from_payload("pull_request", r#"{ "action": "opened" }"#);
        assert!(matches!(result, Err(Error::Event(_))));
    }

    #[test]
    fn test_pull_request_event_without_path_fails() {
        let result = Trigger::from_event(Some("pull_request"), None);
        assert!(matches!(result, Err(Error::Event(_))));
    }
}
