//! Shared command context
//!
//! Resolves credentials, the target repository and the event trigger before
//! any GitHub call is made.

use conflict_labeler::auth::get_github_auth;
use conflict_labeler::error::Result;
use conflict_labeler::event::Trigger;
use conflict_labeler::platform::{GitHubService, PlatformService, parse_repo_info};
use std::path::PathBuf;
use tracing::debug;

/// Where the run was invoked from and what it should act on
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Explicit token (flag or `INPUT_GITHUB_TOKEN`)
    pub token: Option<String>,
    /// `owner/repo` slug
    pub repository: String,
    /// API base URL override
    pub api_url: Option<String>,
    /// Name of the triggering event
    pub event_name: Option<String>,
    /// Path to the event payload JSON
    pub event_path: Option<PathBuf>,
    /// Force single-PR mode for this number
    pub pr: Option<u64>,
}

/// Platform service plus the trigger for this run
pub struct CommandContext {
    /// GitHub gateway
    pub platform: Box<dyn PlatformService>,
    /// What to reconcile
    pub trigger: Trigger,
}

impl CommandContext {
    /// Build the context from the invocation
    pub async fn new(invocation: &Invocation) -> Result<Self> {
        // An unreadable payload fails before any token lookup
        let trigger = match invocation.pr {
            Some(number) => Trigger::PullRequest {
                number,
                mergeable_hint: None,
            },
            None => Trigger::from_event(
                invocation.event_name.as_deref(),
                invocation.event_path.as_deref(),
            )?,
        };

        let config = parse_repo_info(&invocation.repository, invocation.api_url.as_deref())?;
        let auth = get_github_auth(invocation.token.as_deref()).await?;
        debug!(source = ?auth.source, owner = %config.owner, repo = %config.repo, "authenticated");

        let platform = GitHubService::new(&auth.token, config)?;

        Ok(Self {
            platform: Box::new(platform),
            trigger,
        })
    }
}
