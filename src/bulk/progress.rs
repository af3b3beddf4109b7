//! Progress reporting for the bulk engine

use crate::bulk::result::ProjectResult;
use async_trait::async_trait;

/// Points in the per-project procedure where observers are notified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    /// About to check origin and target branches
    CheckingBranches,
    /// About to query open MRs for the pair
    CheckingMergeRequests,
    /// About to compare branches
    ComparingBranches,
    /// Changes found; about to create the MR
    CreatingMergeRequest {
        /// Commits the origin adds over the target
        commits: usize,
    },
}

impl std::fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CheckingBranches => write!(f, "Checking branches..."),
            Self::CheckingMergeRequests => write!(f, "Checking existing merge requests..."),
            Self::ComparingBranches => write!(f, "Comparing branches..."),
            Self::CreatingMergeRequest { commits } => write!(
                f,
                "Found {commits} commit(s) with changes, creating merge request..."
            ),
        }
    }
}

/// Observer for engine progress
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called at each checkpoint of a project's reconciliation
    async fn on_checkpoint(&self, project: &str, checkpoint: Checkpoint);

    /// Called once per project with its final result
    async fn on_result(&self, _result: &ProjectResult) {}
}

/// Progress callback that does nothing
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_checkpoint(&self, _project: &str, _checkpoint: Checkpoint) {}
}
