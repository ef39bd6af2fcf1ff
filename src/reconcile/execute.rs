//! Label execution - effectful operations
//!
//! Takes a `LabelPlan` and applies it through the platform API, one PR at a
//! time. Each step issues at most one label mutation.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::reconcile::plan::{LabelAction, LabelPlan, LabelStep, SkipReason};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// What to do when one PR fails mid-run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole run on the first failure
    Strict,
    /// Record the failure and continue with the next PR
    #[default]
    Lenient,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "unknown failure policy '{other}' (expected strict or lenient)"
            )),
        }
    }
}

/// A PR that could not be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrFailure {
    /// PR number
    pub pr_number: u64,
    /// Error message
    pub message: String,
}

/// Result of plan execution
#[derive(Debug, Clone, Default)]
pub struct LabelExecutionResult {
    /// PRs the label was added to
    pub labeled: Vec<u64>,
    /// PRs the label was removed from
    pub unlabeled: Vec<u64>,
    /// PRs left untouched because their label already matched
    pub unchanged: Vec<u64>,
    /// PRs whose mutation failed (lenient mode only)
    pub failures: Vec<PrFailure>,
}

impl LabelExecutionResult {
    /// Check if every step succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Options for plan execution
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteOptions<'a> {
    /// Comment body posted after a label is added
    pub comment: Option<&'a str>,
    /// Failure handling
    pub failure_policy: FailurePolicy,
}

async fn apply_step(
    step: &LabelStep,
    plan: &LabelPlan,
    platform: &dyn PlatformService,
    options: ExecuteOptions<'_>,
    progress: &dyn ProgressCallback,
) -> Result<()> {
    match step.action {
        LabelAction::Add => {
            info!(pr_number = step.pr_number, "Labeling #{}...", step.pr_number);
            progress.on_message(&format!("Labeling PR #{}", step.pr_number)).await;
            platform.add_label(&plan.label.id, &step.subject_id).await?;

            if let Some(body) = options.comment {
                // Comment failures are non-fatal.
                if let Err(e) = platform.create_comment(&step.subject_id, body).await {
                    warn!(pr_number = step.pr_number, error = %e, "failed to post conflict comment");
                }
            }
        }
        LabelAction::Remove => {
            info!(pr_number = step.pr_number, "Unlabeling #{}...", step.pr_number);
            progress
                .on_message(&format!("Unlabeling PR #{}", step.pr_number))
                .await;
            platform.remove_label(&plan.label.id, &step.subject_id).await?;
        }
        LabelAction::Skip(reason) => {
            debug!(pr_number = step.pr_number, ?reason, "skipping");
        }
    }
    Ok(())
}

/// Execute the label plan (EFFECTFUL)
///
/// Steps run sequentially. Under [`FailurePolicy::Strict`] the first failing
/// mutation is returned as the error; under [`FailurePolicy::Lenient`] it is
/// recorded in the result and execution continues.
pub async fn execute_label_plan(
    plan: &LabelPlan,
    platform: &dyn PlatformService,
    options: ExecuteOptions<'_>,
    progress: &dyn ProgressCallback,
) -> Result<LabelExecutionResult> {
    let mut result = LabelExecutionResult::default();

    for step in &plan.steps {
        match apply_step(step, plan, platform, options, progress).await {
            Ok(()) => match step.action {
                LabelAction::Add => result.labeled.push(step.pr_number),
                LabelAction::Remove => result.unlabeled.push(step.pr_number),
                LabelAction::Skip(SkipReason::Undetermined) => {}
                LabelAction::Skip(_) => result.unchanged.push(step.pr_number),
            },
            Err(e) if options.failure_policy == FailurePolicy::Strict => {
                return Err(annotate(step.pr_number, e));
            }
            Err(e) => {
                warn!(pr_number = step.pr_number, error = %e, "label update failed, continuing");
                progress
                    .on_message(&format!("Failed to update PR #{}: {e}", step.pr_number))
                    .await;
                result.failures.push(PrFailure {
                    pr_number: step.pr_number,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(result)
}

/// Attach the PR number to an error message so the run's final status names it
pub(crate) fn annotate(pr_number: u64, error: Error) -> Error {
    match error {
        Error::GitHubApi(msg) => Error::GitHubApi(format!("PR #{pr_number}: {msg}")),
        Error::Platform(msg) => Error::Platform(format!("PR #{pr_number}: {msg}")),
        other => other,
    }
}
