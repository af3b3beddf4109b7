//! Merge command - interactively accept open MRs across a topic

use crate::cli::context::{CommandContext, GitLabArgs};
use crate::cli::style::{CHECK, CROSS, RULE, Stylize, hyperlink, spinner_style};
use anstream::println;
use anyhow::{Context, Result};
use clap::Args;
use dialoguer::Confirm;
use gitlab_tools::config::load_config;
use gitlab_tools::error::Error;
use gitlab_tools::merge::{MergeDecision, MergeEvent, MergePrompt, run_merge_session};
use gitlab_tools::platform::list_all_projects_by_topic;
use gitlab_tools::types::{MergeRequest, Project};
use indicatif::ProgressBar;
use std::process::ExitCode;
use std::time::Duration;

/// Page size when walking a topic's projects
const PER_PAGE: u32 = 100;

/// Interactively merge open MRs by target branch and topic
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Target branch to merge into
    #[arg(long, value_name = "BRANCH")]
    pub target: String,
    /// Topic to filter projects
    #[arg(long)]
    pub topic: String,
    #[command(flatten)]
    pub gitlab: GitLabArgs,
}

/// Run the merge command
pub async fn run_merge(args: MergeArgs) -> Result<ExitCode> {
    anyhow::ensure!(
        !args.target.trim().is_empty() && !args.topic.trim().is_empty(),
        "both --target and --topic are required"
    );

    let file_config = load_config()?;
    let ctx = CommandContext::new(&args.gitlab, &file_config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Fetching projects for topic: {}", args.topic.accent()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let projects = list_all_projects_by_topic(ctx.platform(), &args.topic, PER_PAGE)
        .await
        .context("failed to fetch projects");
    spinner.finish_and_clear();
    let projects = projects?;

    if projects.is_empty() {
        println!(
            "{}",
            format!("No projects found for topic: {}", args.topic).warn()
        );
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{}",
        format!("{CHECK} Found {} projects", projects.len()).success()
    );
    println!();

    let summary =
        run_merge_session(ctx.platform(), &projects, &args.target, &DialoguerPrompt).await;

    println!("{}", RULE.heading());
    println!("{}", "Summary".heading().emphasis());
    println!("{}", RULE.heading());
    println!("{}", format!("{CHECK} Merged:  {}", summary.merged).success());
    println!("{}", format!("⊘ Skipped: {}", summary.skipped).warn());
    if summary.has_errors() {
        println!("{}", format!("{CROSS} Errors:  {}", summary.errors).failure());
    }
    if summary.quit {
        println!("{}", "Session ended early".muted());
    }
    println!("{}", RULE.heading());

    Ok(if summary.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Terminal prompt backed by dialoguer
struct DialoguerPrompt;

impl MergePrompt for DialoguerPrompt {
    fn confirm(
        &self,
        project: &Project,
        merge_request: &MergeRequest,
    ) -> gitlab_tools::error::Result<MergeDecision> {
        println!("{}", RULE.heading());
        println!("{} {}", "Project:".heading(), project.path_with_namespace);
        println!("{} {}", "MR Title:".heading(), merge_request.title);
        println!(
            "{} {} → {}",
            "Branches:".heading(),
            merge_request.source_branch.accent(),
            merge_request.target_branch.accent()
        );
        println!("{} {}", "URL:".heading(), hyperlink(&merge_request.web_url));
        println!("{}", RULE.heading());

        // Esc or q ends the session
        let answer = Confirm::new()
            .with_prompt("Merge this MR?")
            .default(false)
            .interact_opt()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?;

        Ok(match answer {
            Some(true) => MergeDecision::Merge,
            Some(false) => MergeDecision::Skip,
            None => MergeDecision::Quit,
        })
    }

    fn report(&self, event: &MergeEvent<'_>) {
        match event {
            MergeEvent::ListFailed { project, error } => println!(
                "{}",
                format!(
                    "{CROSS} Error fetching MRs for {}: {error}",
                    project.path_with_namespace
                )
                .failure()
            ),
            MergeEvent::Merged { .. } => {
                println!("{}", format!("{CHECK} Successfully merged!").success());
                println!();
            }
            MergeEvent::Skipped { .. } => {
                println!("{}", "⊘ Skipped".warn());
                println!();
            }
            MergeEvent::MergeFailed { error, .. } => {
                println!("{}", format!("{CROSS} Failed to merge: {error}").failure());
                println!();
            }
            MergeEvent::PromptClosed { error } => {
                println!();
                println!("{}", format!("No more input ({error}), stopping").muted());
                println!();
            }
        }
    }
}
