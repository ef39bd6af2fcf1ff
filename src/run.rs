//! Run orchestration
//!
//! Resolves the conflict label, gathers PRs for the trigger, assesses each
//! one (with the optional soft-conflict check), then plans and executes the
//! label changes. Everything is awaited in sequence.

use crate::error::{Error, Result};
use crate::event::Trigger;
use crate::platform::PlatformService;
use crate::poll::{PollOutcome, format_pr_numbers, gather_pull_request, gather_pull_requests};
use crate::progress::ProgressCallback;
use crate::reconcile::{
    ExecuteOptions, FailurePolicy, PrAssessment, PrFailure, SoftConflictCheck, annotate,
    create_label_plan, execute_label_plan, find_label_by_name,
};
use crate::soft_conflict::detect_soft_conflict;
use crate::types::{Label, MergeStatus, PullRequest, RetryBudget, StatusModel};
use tracing::{debug, info, warn};

/// Comment posted when comments are enabled without a custom body
pub const DEFAULT_CONFLICT_COMMENT: &str =
    ":warning: There is a conflict on this PR. If you are the author, please solve it.";

/// Options for a reconciliation run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Poll budget for mergeability
    pub retry: RetryBudget,
    /// How raw GitHub fields map to a merge status
    pub status_model: StatusModel,
    /// Compare each mergeable PR's diff with its potential merge commit
    pub detect_soft_conflicts: bool,
    /// Comment posted after labeling a PR
    pub comment: Option<String>,
    /// Per-PR failure handling
    pub failure_policy: FailurePolicy,
}

/// Outcome of a run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// PRs the label was added to
    pub labeled: Vec<u64>,
    /// PRs the label was removed from
    pub unlabeled: Vec<u64>,
    /// PRs whose label already matched
    pub unchanged: Vec<u64>,
    /// PRs whose merge status stayed unknown after all retries
    pub undetermined: Vec<u64>,
    /// PRs that failed (lenient mode)
    pub failures: Vec<PrFailure>,
}

impl RunReport {
    /// Whether the run finished without undetermined PRs or failures
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.undetermined.is_empty() && self.failures.is_empty()
    }

    /// Human-readable failure summary naming the PRs responsible
    pub fn failure_message(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.undetermined.is_empty() {
            parts.push(format!(
                "Could not determine mergeable status for: {}",
                format_pr_numbers(&self.undetermined)
            ));
        }
        parts.extend(
            self.failures
                .iter()
                .map(|f| format!("Failed to update #{}: {}", f.pr_number, f.message)),
        );
        (!parts.is_empty()).then(|| parts.join("; "))
    }
}

/// Explicit context for one run: platform, resolved label and options
pub struct RunContext<'a> {
    platform: &'a dyn PlatformService,
    label: Label,
    options: RunOptions,
}

impl<'a> RunContext<'a> {
    /// Create a run context, resolving the conflict label by exact name
    ///
    /// Fails before any mutation if the label name is blank or absent.
    pub async fn new(
        platform: &'a dyn PlatformService,
        label_name: &str,
        options: RunOptions,
    ) -> Result<Self> {
        if label_name.trim().is_empty() {
            return Err(Error::MissingInput("conflict_label_name".to_string()));
        }

        let candidates = platform.find_labels(label_name).await?;
        let label = find_label_by_name(&candidates, label_name)?;
        debug!(label_id = %label.id, label_name = %label.name, "resolved conflict label");

        Ok(Self {
            platform,
            label,
            options,
        })
    }

    /// The resolved conflict label
    pub const fn label(&self) -> &Label {
        &self.label
    }

    /// Reconcile labels for the given trigger
    pub async fn run(
        &self,
        trigger: Trigger,
        progress: &dyn ProgressCallback,
    ) -> Result<RunReport> {
        progress
            .on_message(&format!("Gathering data for {trigger}"))
            .await;
        let gathered = self.gather(trigger).await?;
        info!(
            count = gathered.value.len(),
            attempts = gathered.attempts,
            "gathered pull requests"
        );

        let mut failures = Vec::new();
        let mut assessments = Vec::with_capacity(gathered.value.len());
        for pr in &gathered.value {
            match self.assess(pr).await {
                Ok(assessment) => assessments.push(assessment),
                Err(e) if self.options.failure_policy == FailurePolicy::Strict => {
                    return Err(annotate(pr.number, e));
                }
                Err(e) => {
                    warn!(pr_number = pr.number, error = %e, "could not assess PR, skipping");
                    failures.push(PrFailure {
                        pr_number: pr.number,
                        message: e.to_string(),
                    });
                }
            }
        }

        let plan = create_label_plan(&assessments, &self.label);
        debug!(
            steps = plan.steps.len(),
            mutations = plan.mutation_count(),
            "created label plan"
        );

        progress.on_message("Updating labels").await;
        let executed = execute_label_plan(
            &plan,
            self.platform,
            ExecuteOptions {
                comment: self.options.comment.as_deref(),
                failure_policy: self.options.failure_policy,
            },
            progress,
        )
        .await?;
        failures.extend(executed.failures);

        Ok(RunReport {
            labeled: executed.labeled,
            unlabeled: executed.unlabeled,
            unchanged: executed.unchanged,
            undetermined: gathered.undetermined,
            failures,
        })
    }

    async fn gather(&self, trigger: Trigger) -> Result<PollOutcome<Vec<PullRequest>>> {
        let model = self.options.status_model;
        let budget = self.options.retry;

        match trigger {
            Trigger::All => gather_pull_requests(self.platform, model, budget).await,
            Trigger::PullRequest {
                number,
                mergeable_hint,
            } => {
                let outcome =
                    gather_pull_request(self.platform, model, number, mergeable_hint, budget)
                        .await?;
                Ok(PollOutcome {
                    value: vec![outcome.value],
                    undetermined: outcome.undetermined,
                    attempts: outcome.attempts,
                })
            }
        }
    }

    async fn assess(&self, pr: &PullRequest) -> Result<PrAssessment> {
        let model = self.options.status_model;
        let soft_conflict =
            if self.options.detect_soft_conflicts && model.resolve(pr) == MergeStatus::Mergeable {
                if detect_soft_conflict(self.platform, pr).await? {
                    SoftConflictCheck::Changed
                } else {
                    SoftConflictCheck::Unchanged
                }
            } else {
                SoftConflictCheck::Disabled
            };

        Ok(PrAssessment::new(pr, &self.label, model, soft_conflict))
    }
}
