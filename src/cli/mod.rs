//! Command implementations for the `gitlab-tools` binary

pub mod bulk_mr;
pub mod context;
pub mod merge;
pub mod projects;
pub mod style;
pub mod topics;

use anstream::eprintln;
use async_trait::async_trait;
use gitlab_tools::bulk::{Checkpoint, ProgressCallback};
use style::Stylize;
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins; otherwise `--verbose` turns on this crate's debug events.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,gitlab_tools=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Progress callback printing engine checkpoints to stderr in verbose mode
pub struct CliProgress {
    verbose: bool,
}

impl CliProgress {
    /// Create a progress printer; silent unless `verbose`
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_checkpoint(&self, project: &str, checkpoint: Checkpoint) {
        if self.verbose {
            eprintln!(
                "{} {}",
                format!("[{project}]").accent(),
                checkpoint.to_string().muted()
            );
        }
    }
}
