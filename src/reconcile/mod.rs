//! Conflict label reconciliation
//!
//! Three-phase pattern:
//! 1. Gather - poll PRs and run soft-conflict checks (effectful, bounded)
//! 2. Plan - create `LabelPlan` (pure, testable)
//! 3. Execute - add/remove labels (effectful)

mod execute;
mod plan;

pub use execute::{
    ExecuteOptions, FailurePolicy, LabelExecutionResult, PrFailure, execute_label_plan,
};
pub(crate) use execute::annotate;
pub use plan::{
    LabelAction, LabelPlan, LabelStep, PrAssessment, SkipReason, SoftConflictCheck,
    create_label_plan, decide_label_action, find_label_by_name, is_already_labeled,
};
