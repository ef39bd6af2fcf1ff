//! conflict-labeler CLI

mod cli;

use anyhow::{Context, anyhow};
use clap::Parser;
use cli::context::Invocation;
use cli::inputs::{comment_body, parse_bool_input, parse_max_retries, parse_wait_ms};
use cli::style::{Stylize, cross};
use conflict_labeler::reconcile::FailurePolicy;
use conflict_labeler::run::RunOptions;
use conflict_labeler::types::{RetryBudget, StatusModel};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Keep a merge-conflict label in sync with open pull requests
#[derive(Parser, Debug)]
#[command(name = "conflict-labeler", version, about)]
struct Cli {
    /// Name of the label applied to conflicting pull requests
    #[arg(long = "label", env = "INPUT_CONFLICT_LABEL_NAME")]
    conflict_label_name: String,

    /// GitHub token (falls back to `GITHUB_TOKEN`, `GH_TOKEN`, then `gh auth token`)
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Milliseconds to wait between mergeability polls
    #[arg(long, env = "INPUT_WAIT_MS", default_value = "5000", value_parser = parse_wait_ms)]
    wait_ms: u64,

    /// Total number of mergeability fetches (invalid values become 1)
    #[arg(long, env = "INPUT_MAX_RETRIES", default_value = "1", value_parser = parse_max_retries)]
    max_retries: u32,

    /// Also flag mergeable PRs whose merge commit changes different files
    #[arg(
        long,
        env = "INPUT_DETECT_MERGE_CHANGES",
        default_value = "false",
        default_missing_value = "true",
        num_args = 0..=1,
        value_parser = parse_bool_input
    )]
    detect_soft_conflicts: bool,

    /// Comment on newly labeled PRs: `true` for the default text, or a custom body
    #[arg(long, env = "INPUT_COMMENT")]
    comment: Option<String>,

    /// Per-PR failure handling: `lenient` or `strict`
    #[arg(long, env = "INPUT_FAILURE_POLICY", default_value = "lenient")]
    failure_policy: FailurePolicy,

    /// Merge status source: `mergeable`, `merge-state-status` or `combined`
    #[arg(long, env = "INPUT_STATUS_MODEL", default_value = "mergeable")]
    status_model: StatusModel,

    /// Repository as `owner/repo`
    #[arg(long = "repo", env = "GITHUB_REPOSITORY")]
    repository: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: Option<String>,

    /// Path to the event payload JSON
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Only check this pull request
    #[arg(long)]
    pr: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn invocation(&self) -> Invocation {
        Invocation {
            token: self.github_token.clone(),
            repository: self.repository.clone(),
            api_url: self.api_url.clone().filter(|url| !url.trim().is_empty()),
            event_name: self.event_name.clone(),
            event_path: self.event_path.clone(),
            pr: self.pr,
        }
    }

    fn run_options(&self) -> RunOptions {
        RunOptions {
            retry: RetryBudget::from_millis(self.wait_ms, self.max_retries),
            status_model: self.status_model,
            detect_soft_conflicts: self.detect_soft_conflicts,
            comment: comment_body(self.comment.as_deref()),
            failure_policy: self.failure_policy,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let label_name = &args.conflict_label_name;
    let report = cli::run::run_reconcile(&args.invocation(), label_name, args.run_options())
        .await
        .with_context(|| format!("failed to sync label '{label_name}'"))?;

    match report.failure_message() {
        Some(message) => Err(anyhow!(message)),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            anstream::eprintln!("{} {}", cross(), format!("{e:#}").failure());
            ExitCode::FAILURE
        }
    }
}
