//! Projects command - list projects carrying a topic

use crate::cli::context::{CommandContext, GitLabArgs};
use crate::cli::style::{Stylize, hyperlink, truncate};
use anstream::{print, println};
use anyhow::{Context, Result};
use clap::Args;
use gitlab_tools::config::load_config;
use gitlab_tools::types::Project;
use std::process::ExitCode;

/// List all projects for a specific topic
#[derive(Args, Debug)]
pub struct ProjectsArgs {
    /// Topic name
    #[arg(long)]
    pub topic: String,
    /// Page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Number of projects per page
    #[arg(long, default_value_t = 50)]
    pub per_page: u32,
    #[command(flatten)]
    pub gitlab: GitLabArgs,
}

/// Run the projects command
pub async fn run_projects(args: ProjectsArgs) -> Result<ExitCode> {
    anyhow::ensure!(!args.topic.trim().is_empty(), "--topic is required");

    let file_config = load_config()?;
    let ctx = CommandContext::new(&args.gitlab, &file_config)?;

    let projects = ctx
        .platform()
        .list_projects_by_topic(&args.topic, args.page, args.per_page)
        .await
        .context("failed to fetch projects")?;

    render_projects(&args.topic, &projects);
    Ok(ExitCode::SUCCESS)
}

fn render_projects(topic: &str, projects: &[Project]) {
    println!();
    println!(
        "📁 {}",
        format!("Projects in topic: {topic}").accent().emphasis()
    );
    println!();

    if projects.is_empty() {
        println!("{}", "No projects found for this topic.".muted());
        return;
    }

    for (i, project) in projects.iter().enumerate() {
        println!(
            "{} {}",
            format!("{}.", i + 1).emphasis(),
            project.name.emphasis()
        );
        println!("   {}", project.path_with_namespace.muted());

        if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
            println!("   {}", truncate(description, 80).muted());
        }

        let other_topics: Vec<&str> = project
            .topics
            .iter()
            .map(String::as_str)
            .filter(|t| *t != topic)
            .collect();
        if !other_topics.is_empty() {
            print!("   ");
            for t in other_topics {
                print!("{} ", format!(" {t} ").accent());
            }
            println!();
        }

        println!("   {}", hyperlink(&project.web_url).success());
        println!();
    }
}
