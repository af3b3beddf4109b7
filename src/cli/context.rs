//! Shared command context for CLI commands
//!
//! Extracts the connection setup shared by every command.

use clap::Args;
use gitlab_tools::auth::get_gitlab_auth;
use gitlab_tools::config::FileConfig;
use gitlab_tools::error::Result;
use gitlab_tools::platform::{GitLabService, PlatformService};
use tracing::debug;

/// Connection flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct GitLabArgs {
    /// GitLab base URL (default: GITLAB_BASE_URL env)
    #[arg(long, value_name = "URL")]
    pub gitlab_url: Option<String>,
    /// GitLab API token (default: GITLAB_TOKEN env)
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,
    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,
}

/// Shared context for CLI commands that interact with GitLab
pub struct CommandContext {
    /// GitLab service
    pub platform: GitLabService,
}

impl CommandContext {
    /// Resolve credentials and build the GitLab service
    pub fn new(args: &GitLabArgs, file_config: &FileConfig) -> Result<Self> {
        let auth = get_gitlab_auth(
            args.gitlab_url.as_deref(),
            args.token.as_deref(),
            file_config,
        )?;
        debug!(base_url = %auth.base_url, token_source = ?auth.token_source, "resolved GitLab auth");

        let platform = GitLabService::new(&auth.base_url, auth.token)?;
        Ok(Self { platform })
    }

    /// The platform as a trait object, for the engines
    pub fn platform(&self) -> &dyn PlatformService {
        &self.platform
    }
}
