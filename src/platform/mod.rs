//! Platform services for GitLab
//!
//! The reconciliation engine and the interactive merge session only ever see
//! [`PlatformService`]; production code plugs in [`GitLabService`], tests
//! plug in an in-memory double.

mod gitlab;
mod pagination;

pub use gitlab::GitLabService;
pub use pagination::list_all_projects_by_topic;

use crate::error::Result;
use crate::types::{BranchComparison, MergeRequest, Project, Topic};
use async_trait::async_trait;

/// Platform service trait for project, branch and MR operations
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Resolve a project by its full path (e.g. `group/repo`)
    async fn get_project(&self, path: &str) -> Result<Project>;

    /// Check whether a branch exists.
    ///
    /// A "not found" answer is `Ok(false)`, not an error.
    async fn branch_exists(&self, project_id: u64, branch: &str) -> Result<bool>;

    /// Compare `source` against `target` (target is the base, source the head)
    async fn compare_branches(
        &self,
        project_id: u64,
        source: &str,
        target: &str,
    ) -> Result<BranchComparison>;

    /// List open MRs for exactly this source/target pair, in API order
    async fn find_open_merge_requests(
        &self,
        project_id: u64,
        source: &str,
        target: &str,
    ) -> Result<Vec<MergeRequest>>;

    /// Create a new MR
    async fn create_merge_request(
        &self,
        project_id: u64,
        source: &str,
        target: &str,
        title: &str,
        description: &str,
    ) -> Result<MergeRequest>;

    // =========================================================================
    // Listing and merge methods (topics, projects, merge commands)
    // =========================================================================

    /// List one page of topics
    async fn list_topics(&self, page: u32, per_page: u32) -> Result<Vec<Topic>>;

    /// List one page of projects tagged with `topic`
    async fn list_projects_by_topic(
        &self,
        topic: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Project>>;

    /// List open MRs targeting `target`, whatever their source branch
    async fn list_open_merge_requests_by_target(
        &self,
        project_id: u64,
        target: &str,
    ) -> Result<Vec<MergeRequest>>;

    /// Accept (merge) an MR by its project-scoped IID
    async fn accept_merge_request(&self, project_id: u64, iid: u64) -> Result<MergeRequest>;
}
