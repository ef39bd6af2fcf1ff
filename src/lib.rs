//! conflict-labeler - keep a merge-conflict label in sync with open pull requests
//!
//! A CI job that polls GitHub until every open pull request (or the one that
//! triggered the run) has a known merge status, then adds the configured
//! label to conflicting pull requests and removes it from ones that became
//! mergeable again. Optionally it also flags "soft" conflicts: pull requests
//! that report as mergeable but whose potential merge commit changes
//! different files than the pull request itself.
//!
//! ```text
//! RunContext ─▶ poll ─▶ soft_conflict (optional) ─▶ reconcile::plan ─▶ reconcile::execute
//!                 │                                                          │
//!                 └──────────────────── PlatformService ◀────────────────────┘
//! ```

pub mod auth;
pub mod error;
pub mod event;
pub mod platform;
pub mod poll;
pub mod progress;
pub mod reconcile;
pub mod run;
pub mod soft_conflict;
pub mod types;
