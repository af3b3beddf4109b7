//! Merge execution - effectful operations
//!
//! Walks projects in order, offers each non-draft MR targeting the branch
//! to a [`MergePrompt`], and accepts the ones the prompt approves. Failures
//! are counted and reported, never fatal. A prompt that can no longer read
//! an answer (end of input, no terminal) ends the session like a quit.

use crate::error::{Error, Result};
use crate::merge::plan::filter_merge_candidates;
use crate::platform::PlatformService;
use crate::types::{MergeRequest, Project};
use tracing::debug;

/// Answer from the prompt for one MR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// Accept this MR
    Merge,
    /// Leave this MR alone
    Skip,
    /// Stop the session
    Quit,
}

/// Something that happened during the session
#[derive(Debug)]
pub enum MergeEvent<'a> {
    /// Listing MRs for a project failed
    ListFailed {
        /// Project whose listing failed
        project: &'a Project,
        /// Cause
        error: &'a Error,
    },
    /// MR was accepted
    Merged {
        /// Owning project
        project: &'a Project,
        /// The MR
        merge_request: &'a MergeRequest,
    },
    /// MR was skipped by the user
    Skipped {
        /// Owning project
        project: &'a Project,
        /// The MR
        merge_request: &'a MergeRequest,
    },
    /// Accepting the MR failed
    MergeFailed {
        /// Owning project
        project: &'a Project,
        /// The MR
        merge_request: &'a MergeRequest,
        /// Cause
        error: &'a Error,
    },
    /// The prompt could not read an answer; the session ends here
    PromptClosed {
        /// Cause
        error: &'a Error,
    },
}

/// User interaction seam for the session
pub trait MergePrompt: Sync {
    /// Ask whether to merge `merge_request`
    fn confirm(&self, project: &Project, merge_request: &MergeRequest) -> Result<MergeDecision>;

    /// Report an event as it happens
    fn report(&self, event: &MergeEvent<'_>);
}

/// Counts for a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSessionSummary {
    /// MRs accepted
    pub merged: usize,
    /// MRs the user declined
    pub skipped: usize,
    /// Failed listings plus failed merges
    pub errors: usize,
    /// Whether the user ended the session early
    pub quit: bool,
}

impl MergeSessionSummary {
    /// Whether the session should exit non-zero
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Run an interactive merge session over `projects` for MRs targeting `target`
///
/// Always returns the counts gathered so far, including when the prompt
/// fails part way through.
pub async fn run_merge_session(
    platform: &dyn PlatformService,
    projects: &[Project],
    target: &str,
    prompt: &dyn MergePrompt,
) -> MergeSessionSummary {
    let mut summary = MergeSessionSummary::default();

    'projects: for project in projects {
        let mrs = match platform
            .list_open_merge_requests_by_target(project.id, target)
            .await
        {
            Ok(mrs) => mrs,
            Err(error) => {
                prompt.report(&MergeEvent::ListFailed {
                    project,
                    error: &error,
                });
                summary.errors += 1;
                continue;
            }
        };

        let candidates = filter_merge_candidates(mrs);
        debug!(
            project = %project.path_with_namespace,
            candidates = candidates.len(),
            "collected merge candidates"
        );

        for merge_request in &candidates {
            let decision = match prompt.confirm(project, merge_request) {
                Ok(decision) => decision,
                Err(error) => {
                    debug!(error = %error, "prompt closed");
                    prompt.report(&MergeEvent::PromptClosed { error: &error });
                    summary.quit = true;
                    break 'projects;
                }
            };

            match decision {
                MergeDecision::Quit => {
                    summary.quit = true;
                    break 'projects;
                }
                MergeDecision::Skip => {
                    summary.skipped += 1;
                    prompt.report(&MergeEvent::Skipped {
                        project,
                        merge_request,
                    });
                }
                MergeDecision::Merge => {
                    match platform
                        .accept_merge_request(project.id, merge_request.iid)
                        .await
                    {
                        Ok(_) => {
                            summary.merged += 1;
                            prompt.report(&MergeEvent::Merged {
                                project,
                                merge_request,
                            });
                        }
                        Err(error) => {
                            summary.errors += 1;
                            prompt.report(&MergeEvent::MergeFailed {
                                project,
                                merge_request,
                                error: &error,
                            });
                        }
                    }
                }
            }
        }
    }

    summary
}
