//! Topics command - list GitLab topics

use crate::cli::context::{CommandContext, GitLabArgs};
use crate::cli::style::{Stylize, truncate};
use anstream::println;
use anyhow::{Context, Result};
use clap::Args;
use gitlab_tools::config::load_config;
use gitlab_tools::types::Topic;
use std::process::ExitCode;

/// List all GitLab topics
#[derive(Args, Debug)]
pub struct TopicsArgs {
    /// Page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Number of topics per page
    #[arg(long, default_value_t = 50)]
    pub per_page: u32,
    #[command(flatten)]
    pub gitlab: GitLabArgs,
}

/// Run the topics command
pub async fn run_topics(args: TopicsArgs) -> Result<ExitCode> {
    let file_config = load_config()?;
    let ctx = CommandContext::new(&args.gitlab, &file_config)?;

    let topics = ctx
        .platform()
        .list_topics(args.page, args.per_page)
        .await
        .context("failed to fetch topics")?;

    render_topics(&topics);
    Ok(ExitCode::SUCCESS)
}

fn render_topics(topics: &[Topic]) {
    println!();
    println!("📚 {}", "GitLab Topics".accent().emphasis());
    println!();

    if topics.is_empty() {
        println!("{}", "No topics found.".muted());
        return;
    }

    for (i, topic) in topics.iter().enumerate() {
        let title = topic.title.as_deref().filter(|t| !t.is_empty());
        match title {
            Some(title) if title != topic.name => println!(
                "{} {} - {title}",
                format!("{}.", i + 1).emphasis(),
                topic.name.accent().emphasis()
            ),
            _ => println!(
                "{} {}",
                format!("{}.", i + 1).emphasis(),
                topic.name.accent().emphasis()
            ),
        }

        if topic.total_projects_count > 0 {
            println!(
                "   {}",
                format!("📦 {} projects", topic.total_projects_count).accent()
            );
        }

        if let Some(description) = topic.description.as_deref().filter(|d| !d.is_empty())
            && Some(description) != title
        {
            println!("   {}", truncate(description, 80).muted());
        }

        println!();
    }
}
