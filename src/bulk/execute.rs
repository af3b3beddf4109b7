//! Bulk execution - effectful per-project reconciliation
//!
//! Projects are processed one at a time, in input order. No failure
//! escapes a project: every platform error becomes an `ERROR` result.

use crate::bulk::config::BulkMrConfig;
use crate::bulk::plan::{
    ExistingMergeRequest, classify_open_merge_requests, merge_request_description,
    merge_request_title,
};
use crate::bulk::progress::{Checkpoint, ProgressCallback};
use crate::bulk::result::{ProjectResult, ResultStatus, Summary};
use crate::platform::PlatformService;
use tracing::debug;

/// Reconcile every configured project
///
/// Returns one result per entry of `config.projects`, in the same order,
/// plus the summary tallied from them.
pub async fn process_projects(
    platform: &dyn PlatformService,
    config: &BulkMrConfig,
    progress: &dyn ProgressCallback,
) -> (Vec<ProjectResult>, Summary) {
    let mut results = Vec::with_capacity(config.projects.len());
    let mut summary = Summary::default();

    for project in &config.projects {
        let result = process_project(platform, config, project, progress).await;
        debug!(project = %project, status = %result.status, "project reconciled");

        summary.record(result.status);
        progress.on_result(&result).await;
        results.push(result);
    }

    (results, summary)
}

/// Decide and act for a single project; first matching rule wins
async fn process_project(
    platform: &dyn PlatformService,
    config: &BulkMrConfig,
    path: &str,
    progress: &dyn ProgressCallback,
) -> ProjectResult {
    let origin = config.origin_branch.as_str();
    let target = config.target_branch.as_str();

    let project = match platform.get_project(path).await {
        Ok(project) => project,
        Err(e) => return ProjectResult::error(path, format!("failed to get project {path}: {e}")),
    };

    progress.on_checkpoint(path, Checkpoint::CheckingBranches).await;

    match platform.branch_exists(project.id, origin).await {
        Ok(true) => {}
        Ok(false) => {
            return ProjectResult::skipped(
                path,
                ResultStatus::SkippedNoBranch,
                format!("Origin branch '{origin}' does not exist"),
            );
        }
        Err(e) => {
            return ProjectResult::error(path, format!("failed to check origin branch: {e}"));
        }
    }

    match platform.branch_exists(project.id, target).await {
        Ok(true) => {}
        Ok(false) => {
            return ProjectResult::skipped(
                path,
                ResultStatus::SkippedNoBranch,
                format!("Target branch '{target}' does not exist"),
            );
        }
        Err(e) => {
            return ProjectResult::error(path, format!("failed to check target branch: {e}"));
        }
    }

    progress
        .on_checkpoint(path, Checkpoint::CheckingMergeRequests)
        .await;

    let existing = match platform
        .find_open_merge_requests(project.id, origin, target)
        .await
    {
        Ok(mrs) => mrs,
        Err(e) => {
            return ProjectResult::error(
                path,
                format!("failed to find existing merge requests: {e}"),
            );
        }
    };

    // Any open MR for the pair, draft or not, blocks creation
    match classify_open_merge_requests(&existing) {
        Some(ExistingMergeRequest::Open(mr)) => {
            return ProjectResult::with_merge_request(
                path,
                ResultStatus::SkippedExists,
                mr,
                format!("Open MR already exists: !{}", mr.iid),
            );
        }
        Some(ExistingMergeRequest::Draft(mr)) => {
            return ProjectResult::with_merge_request(
                path,
                ResultStatus::SkippedDraft,
                mr,
                format!("Draft MR exists: !{} ({})", mr.iid, mr.title),
            );
        }
        None => {}
    }

    progress
        .on_checkpoint(path, Checkpoint::ComparingBranches)
        .await;

    let comparison = match platform.compare_branches(project.id, origin, target).await {
        Ok(comparison) => comparison,
        Err(e) => return ProjectResult::error(path, format!("failed to compare branches: {e}")),
    };

    if !comparison.has_changes() {
        return ProjectResult::skipped(
            path,
            ResultStatus::SkippedNoChange,
            format!("No changes between {origin} and {target}"),
        );
    }

    progress
        .on_checkpoint(
            path,
            Checkpoint::CreatingMergeRequest {
                commits: comparison.commits.len(),
            },
        )
        .await;

    let title = merge_request_title(origin, target);
    let description = merge_request_description(origin, target);

    match platform
        .create_merge_request(project.id, origin, target, &title, &description)
        .await
    {
        Ok(mr) => ProjectResult::with_merge_request(
            path,
            ResultStatus::Created,
            &mr,
            format!("MR !{}: {}", mr.iid, mr.web_url),
        ),
        Err(e) => ProjectResult::error(path, format!("failed to create merge request: {e}")),
    }
}
