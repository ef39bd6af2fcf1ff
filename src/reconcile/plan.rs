//! Label planning - pure functions for deciding label actions
//!
//! No I/O happens here. Every PR is re-evaluated from scratch each run, so
//! the decision is a pure function of merge status, the soft-conflict check
//! and current label membership.

use crate::error::{Error, Result};
use crate::types::{Label, MergeStatus, PullRequest, StatusModel};

/// Outcome of the optional soft-conflict check for one PR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftConflictCheck {
    /// Detection disabled, or not run because the PR is not mergeable
    Disabled,
    /// Merge commit matches the PR diff
    Unchanged,
    /// Merge commit differs from the PR diff
    Changed,
}

/// Why a PR is left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Should carry the label and already does
    AlreadyLabeled,
    /// Should not carry the label and doesn't
    NotLabeled,
    /// Merge status still unknown; deferred to the next run
    Undetermined,
}

/// What to do with the conflict label on one PR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAction {
    /// Attach the label
    Add,
    /// Detach the label
    Remove,
    /// Leave the PR untouched
    Skip(SkipReason),
}

/// Decide the label action for one PR
///
/// A hard conflict always wins; the soft-conflict check only matters for
/// mergeable PRs.
pub const fn decide_label_action(
    status: MergeStatus,
    soft_conflict: SoftConflictCheck,
    labeled: bool,
) -> LabelAction {
    let wants_label = match (status, soft_conflict) {
        (MergeStatus::Unknown, _) => return LabelAction::Skip(SkipReason::Undetermined),
        (MergeStatus::Conflicting, _) | (MergeStatus::Mergeable, SoftConflictCheck::Changed) => {
            true
        }
        (MergeStatus::Mergeable, SoftConflictCheck::Disabled | SoftConflictCheck::Unchanged) => {
            false
        }
    };

    match (wants_label, labeled) {
        (true, true) => LabelAction::Skip(SkipReason::AlreadyLabeled),
        (true, false) => LabelAction::Add,
        (false, true) => LabelAction::Remove,
        (false, false) => LabelAction::Skip(SkipReason::NotLabeled),
    }
}

/// Whether the PR already carries the label (matched by ID)
pub fn is_already_labeled(pr: &PullRequest, label: &Label) -> bool {
    pr.labels.iter().any(|l| l.id == label.id)
}

/// Pick the label whose name matches exactly
///
/// Label search on GitHub is fuzzy, so the candidates may include other
/// labels that merely contain `name`.
pub fn find_label_by_name(labels: &[Label], name: &str) -> Result<Label> {
    labels
        .iter()
        .find(|l| l.name == name)
        .cloned()
        .ok_or_else(|| Error::LabelNotFound(name.to_string()))
}

/// Everything the planner needs to know about one PR
#[derive(Debug, Clone)]
pub struct PrAssessment {
    /// PR number
    pub pr_number: u64,
    /// PR node ID (mutation subject)
    pub subject_id: String,
    /// Canonical merge status
    pub status: MergeStatus,
    /// Soft-conflict check result
    pub soft_conflict: SoftConflictCheck,
    /// Whether the conflict label is already attached
    pub labeled: bool,
}

impl PrAssessment {
    /// Assess a PR against the conflict label
    pub fn new(
        pr: &PullRequest,
        label: &Label,
        model: StatusModel,
        soft_conflict: SoftConflictCheck,
    ) -> Self {
        Self {
            pr_number: pr.number,
            subject_id: pr.id.clone(),
            status: model.resolve(pr),
            soft_conflict,
            labeled: is_already_labeled(pr, label),
        }
    }

    /// The label action for this assessment
    pub const fn action(&self) -> LabelAction {
        decide_label_action(self.status, self.soft_conflict, self.labeled)
    }
}

/// A single step in the label plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelStep {
    /// PR number
    pub pr_number: u64,
    /// PR node ID
    pub subject_id: String,
    /// Action to perform
    pub action: LabelAction,
}

impl std::fmt::Display for LabelStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pr_number = self.pr_number;
        match self.action {
            LabelAction::Add => write!(f, "label PR #{pr_number}"),
            LabelAction::Remove => write!(f, "unlabel PR #{pr_number}"),
            LabelAction::Skip(SkipReason::AlreadyLabeled) => {
                write!(f, "skip PR #{pr_number}: already labeled")
            }
            LabelAction::Skip(SkipReason::NotLabeled) => {
                write!(f, "skip PR #{pr_number}: no conflict")
            }
            LabelAction::Skip(SkipReason::Undetermined) => {
                write!(f, "skip PR #{pr_number}: mergeable status unknown")
            }
        }
    }
}

/// Label plan - the functional core output
#[derive(Debug, Clone)]
pub struct LabelPlan {
    /// The conflict label
    pub label: Label,
    /// One step per assessed PR, in fetch order
    pub steps: Vec<LabelStep>,
}

impl LabelPlan {
    /// Check if the plan performs no mutations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mutation_count() == 0
    }

    /// Count add/remove steps
    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.action, LabelAction::Add | LabelAction::Remove))
            .count()
    }
}

/// Create a label plan (PURE - no I/O)
#[must_use]
pub fn create_label_plan(assessments: &[PrAssessment], label: &Label) -> LabelPlan {
    let steps = assessments
        .iter()
        .map(|a| LabelStep {
            pr_number: a.pr_number,
            subject_id: a.subject_id.clone(),
            action: a.action(),
        })
        .collect();

    LabelPlan {
        label: label.clone(),
        steps,
    }
}
