//! gitlab-tools - CLI toolkit for managing GitLab branches and merge requests

mod cli;

use clap::{Parser, Subcommand};
use cli::bulk_mr::{BulkMrArgs, BulkMrTopicArgs};
use cli::merge::MergeArgs;
use cli::projects::ProjectsArgs;
use cli::topics::TopicsArgs;
use std::process::ExitCode;
use tracing::{debug, warn};

/// CLI toolkit for managing GitLab branches and merge requests
#[derive(Parser, Debug)]
#[command(name = "gitlab-tools", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create bulk merge requests across multiple projects
    BulkMr(BulkMrArgs),
    /// Create bulk merge requests for all projects in a topic
    BulkMrTopic(BulkMrTopicArgs),
    /// Interactively merge open MRs by target branch and topic
    Merge(MergeArgs),
    /// List all GitLab topics
    Topics(TopicsArgs),
    /// List all projects for a specific topic
    Projects(ProjectsArgs),
}

impl Commands {
    const fn verbose(&self) -> bool {
        match self {
            Self::BulkMr(args) => args.gitlab.verbose,
            Self::BulkMrTopic(args) => args.gitlab.verbose,
            Self::Merge(args) => args.gitlab.verbose,
            Self::Topics(args) => args.gitlab.verbose,
            Self::Projects(args) => args.gitlab.verbose,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::init_tracing(cli.command.verbose());

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        // A missing .env is fine
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("ignoring .env: {e}"),
    }

    let outcome = match cli.command {
        Commands::BulkMr(args) => cli::bulk_mr::run_bulk_mr(args).await,
        Commands::BulkMrTopic(args) => cli::bulk_mr::run_bulk_mr_topic(args).await,
        Commands::Merge(args) => cli::merge::run_merge(args).await,
        Commands::Topics(args) => cli::topics::run_topics(args).await,
        Commands::Projects(args) => cli::projects::run_projects(args).await,
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            cli::style::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
