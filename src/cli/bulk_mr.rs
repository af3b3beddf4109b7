//! Bulk MR commands - `bulk-mr` and `bulk-mr-topic`

use crate::cli::CliProgress;
use crate::cli::context::{CommandContext, GitLabArgs};
use crate::cli::style::{CHECK, CROSS, Stylize, hyperlink, spinner_style};
use anstream::println;
use anyhow::{Context, Result};
use clap::Args;
use gitlab_tools::bulk::{
    BulkMrConfig, BulkMrReport, ProjectResult, ResultStatus, Summary, expand_project_paths,
    process_projects, validate_branches,
};
use gitlab_tools::config::load_config;
use gitlab_tools::platform::list_all_projects_by_topic;
use indicatif::ProgressBar;
use std::process::ExitCode;
use std::time::Duration;

/// Default page size when walking a topic's projects
const DEFAULT_TOPIC_PER_PAGE: u32 = 100;

/// Create merge requests from origin branch to target branch across multiple projects
#[derive(Args, Debug)]
#[command(after_help = "Examples:\n  \
    gitlab-tools bulk-mr --origin op-stage --target op-rc --project group/repo-a --project group/repo-b\n  \
    gitlab-tools bulk-mr --origin op-stage --target op-rc --group mygroup --project repo-a --project repo-b")]
pub struct BulkMrArgs {
    /// Origin (source) branch name
    #[arg(long, value_name = "BRANCH")]
    pub origin: String,
    /// Target branch name
    #[arg(long, value_name = "BRANCH")]
    pub target: String,
    /// Project path (can be repeated)
    #[arg(long = "project", value_name = "PATH", required = true)]
    pub projects: Vec<String>,
    /// Default group/namespace prefix for project paths without a '/'
    #[arg(long, value_name = "GROUP")]
    pub group: Option<String>,
    /// Print results and summary as JSON
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub gitlab: GitLabArgs,
}

/// Create merge requests from origin to target branch for all projects in a topic
#[derive(Args, Debug)]
pub struct BulkMrTopicArgs {
    /// Origin (source) branch name
    #[arg(long, value_name = "BRANCH")]
    pub origin: String,
    /// Target branch name
    #[arg(long, value_name = "BRANCH")]
    pub target: String,
    /// Topic name
    #[arg(long)]
    pub topic: String,
    /// Number of projects to fetch per page
    #[arg(long, value_name = "N")]
    pub per_page: Option<u32>,
    /// Print results and summary as JSON
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub gitlab: GitLabArgs,
}

/// Run the bulk-mr command
pub async fn run_bulk_mr(args: BulkMrArgs) -> Result<ExitCode> {
    let file_config = load_config()?;

    let group = args.group.as_deref().or(file_config.group.as_deref());
    let projects = expand_project_paths(group, &args.projects);
    let config = BulkMrConfig::new(args.origin, args.target, projects, args.gitlab.verbose)?;

    let ctx = CommandContext::new(&args.gitlab, &file_config)?;

    if !args.json {
        println!("Processing {} project(s)...", config.projects.len());
        println!();
    }

    run_and_report(&ctx, &config, args.json).await
}

/// Run the bulk-mr-topic command
pub async fn run_bulk_mr_topic(args: BulkMrTopicArgs) -> Result<ExitCode> {
    let file_config = load_config()?;

    // Projects are only known after the topic lookup
    validate_branches(&args.origin, &args.target)?;
    anyhow::ensure!(!args.topic.trim().is_empty(), "--topic is required");

    let ctx = CommandContext::new(&args.gitlab, &file_config)?;
    let per_page = args
        .per_page
        .or(file_config.per_page)
        .unwrap_or(DEFAULT_TOPIC_PER_PAGE);

    let spinner = if args.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Fetching projects for topic: {}", args.topic.accent()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let projects = list_all_projects_by_topic(ctx.platform(), &args.topic, per_page)
        .await
        .context("failed to fetch projects");
    spinner.finish_and_clear();
    let projects = projects?;

    if projects.is_empty() {
        if args.json {
            print_json(&BulkMrReport {
                results: Vec::new(),
                summary: Summary::default(),
            })?;
        } else {
            println!("No projects found for topic: {}", args.topic);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let paths = projects
        .into_iter()
        .map(|p| p.path_with_namespace)
        .collect::<Vec<_>>();

    if !args.json {
        println!(
            "Found {} project(s) in topic {}",
            paths.len(),
            args.topic.accent()
        );
        println!();
    }

    let config = BulkMrConfig::new(args.origin, args.target, paths, args.gitlab.verbose)?;
    run_and_report(&ctx, &config, args.json).await
}

async fn run_and_report(
    ctx: &CommandContext,
    config: &BulkMrConfig,
    json: bool,
) -> Result<ExitCode> {
    let progress = CliProgress::new(config.verbose);
    let (results, summary) = process_projects(ctx.platform(), config, &progress).await;

    if json {
        print_json(&BulkMrReport { results, summary })?;
    } else {
        for result in &results {
            print_result(result);
        }
        println!();
        print_summary(&summary);
    }

    Ok(if summary.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_json(report: &BulkMrReport) -> Result<()> {
    let rendered = serde_json::to_string_pretty(report).context("failed to encode report")?;
    println!("{rendered}");
    Ok(())
}

const fn status_icon(status: ResultStatus) -> &'static str {
    match status {
        ResultStatus::Created => CHECK,
        ResultStatus::SkippedExists => "→",
        ResultStatus::SkippedDraft => "⊘",
        ResultStatus::SkippedNoBranch => "⚠",
        ResultStatus::SkippedNoChange => "≡",
        ResultStatus::Error => CROSS,
    }
}

fn print_result(result: &ProjectResult) {
    let label = format!("{} {}", status_icon(result.status), result.status);
    let label = match result.status {
        ResultStatus::Created => label.success(),
        ResultStatus::Error => label.failure(),
        ResultStatus::SkippedNoBranch => label.warn(),
        _ => label.muted(),
    };
    println!("[{}] {label}", result.project.emphasis());

    if let Some(details) = render_details(result) {
        println!("  {details}");
    }
    if let Some(message) = &result.error_message {
        println!("  {} {message}", "Error:".failure());
    }
    println!();
}

/// Detail line with the MR URL shown as a terminal link
fn render_details(result: &ProjectResult) -> Option<String> {
    let details = result.details.as_deref()?;
    Some(match result.merge_request_url.as_deref() {
        Some(url) if details.contains(url) => details.replace(url, &hyperlink(url)),
        _ => details.to_string(),
    })
}

fn print_summary(summary: &Summary) {
    println!("{}", "Summary:".emphasis());
    println!("  Total projects: {}", summary.total);
    println!("  Created: {}", summary.created);
    println!("  Skipped (exists): {}", summary.skipped_exists);
    println!("  Skipped (draft): {}", summary.skipped_draft);
    println!("  Skipped (no changes): {}", summary.skipped_no_change);
    println!("  Skipped (no branch): {}", summary.skipped_no_branch);
    println!("  Errors: {}", summary.errors);
    println!();

    if summary.has_errors() {
        println!("{}", format!("{CROSS} Completed with errors").failure());
    } else {
        println!("{}", format!("{CHECK} Completed successfully").success());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitlab_tools::types::{MergeRequest, MergeRequestState};

    fn created(url: &str) -> ProjectResult {
        let mr = MergeRequest {
            id: 1007,
            iid: 7,
            title: "Merge dev into main".to_string(),
            web_url: url.to_string(),
            state: MergeRequestState::Opened,
            draft: false,
            source_branch: "dev".to_string(),
            target_branch: "main".to_string(),
            project_id: 42,
        };
        ProjectResult::with_merge_request(
            "group/repo",
            ResultStatus::Created,
            &mr,
            format!("MR !7: {url}"),
        )
    }

    #[test]
    fn test_details_link_merge_request_url() {
        let url = "https://gitlab.example.com/group/repo/-/merge_requests/7";

        let rendered = render_details(&created(url)).unwrap();

        assert!(rendered.starts_with("MR !7: "));
        assert!(rendered.ends_with(&hyperlink(url)));
    }

    #[test]
    fn test_details_without_url_unchanged() {
        let result = ProjectResult::skipped(
            "group/repo",
            ResultStatus::SkippedNoChange,
            "No changes between dev and main",
        );

        assert_eq!(
            render_details(&result).as_deref(),
            Some("No changes between dev and main")
        );
        assert_eq!(render_details(&ProjectResult::error("group/repo", "boom")), None);
    }
}
