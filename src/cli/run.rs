//! Run command - reconcile the conflict label once

use crate::cli::CliProgress;
use crate::cli::context::{CommandContext, Invocation};
use crate::cli::style::{Stylize, check, cross};
use anstream::println;
use conflict_labeler::error::Result;
use conflict_labeler::poll::format_pr_numbers;
use conflict_labeler::run::{RunContext, RunOptions, RunReport};

/// Resolve context and label, then reconcile and print a summary
pub async fn run_reconcile(
    invocation: &Invocation,
    label_name: &str,
    options: RunOptions,
) -> Result<RunReport> {
    let ctx = CommandContext::new(invocation).await?;
    let config = ctx.platform.config();
    println!(
        "{} {}/{} {}",
        "Checking".emphasis(),
        config.owner.accent(),
        config.repo.accent(),
        format!("({})", ctx.trigger).muted()
    );

    let run = RunContext::new(ctx.platform.as_ref(), label_name, options).await?;
    let report = run.run(ctx.trigger, &CliProgress).await?;

    print_summary(&report, &run.label().name);
    Ok(report)
}

fn print_summary(report: &RunReport, label_name: &str) {
    println!();
    if !report.labeled.is_empty() {
        println!(
            "{} Labeled {} as {}",
            check(),
            format_pr_numbers(&report.labeled).accent(),
            label_name.emphasis()
        );
    }
    if !report.unlabeled.is_empty() {
        println!(
            "{} Removed {} from {}",
            check(),
            label_name.emphasis(),
            format_pr_numbers(&report.unlabeled).accent()
        );
    }
    if !report.unchanged.is_empty() {
        println!(
            "{}",
            format!("Unchanged: {}", format_pr_numbers(&report.unchanged)).muted()
        );
    }
    if !report.undetermined.is_empty() {
        println!(
            "{} Unknown merge status: {}",
            cross(),
            format_pr_numbers(&report.undetermined).accent()
        );
    }
    for failure in &report.failures {
        println!(
            "{} PR #{}: {}",
            cross(),
            failure.pr_number,
            failure.message.failure()
        );
    }
    if report.labeled.is_empty()
        && report.unlabeled.is_empty()
        && report.undetermined.is_empty()
        && report.failures.is_empty()
    {
        println!("{} {}", check(), "Labels already up to date".success());
    }
}
