//! Per-project outcomes and the run summary

use crate::types::MergeRequest;
use serde::Serialize;

/// Outcome of reconciling one project (exactly one per project)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    /// A new MR was created
    Created,
    /// A non-draft open MR already covers this source/target pair
    SkippedExists,
    /// Only draft open MRs cover this pair
    SkippedDraft,
    /// Origin or target branch is missing
    SkippedNoBranch,
    /// Source has no commits the target lacks
    SkippedNoChange,
    /// A platform call failed
    Error,
}

impl ResultStatus {
    /// Literal uppercase token, as used in reports
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::SkippedExists => "SKIPPED_EXISTS",
            Self::SkippedDraft => "SKIPPED_DRAFT",
            Self::SkippedNoBranch => "SKIPPED_NO_BRANCH",
            Self::SkippedNoChange => "SKIPPED_NO_CHANGE",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified result for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectResult {
    /// Project path as given in the run configuration
    pub project: String,
    /// Terminal status
    pub status: ResultStatus,
    /// Global ID of the referenced MR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_request_id: Option<u64>,
    /// Display number of the referenced MR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_request_iid: Option<u64>,
    /// Web URL of the referenced MR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_request_url: Option<String>,
    /// Human-readable detail line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Failure message (only for `ERROR`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProjectResult {
    fn new(project: &str, status: ResultStatus) -> Self {
        Self {
            project: project.to_string(),
            status,
            merge_request_id: None,
            merge_request_iid: None,
            merge_request_url: None,
            details: None,
            error_message: None,
        }
    }

    /// An `ERROR` result carrying `message`
    pub fn error(project: &str, message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Self::new(project, ResultStatus::Error)
        }
    }

    /// A result with a detail line and no MR reference
    pub fn skipped(project: &str, status: ResultStatus, details: impl Into<String>) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(project, status)
        }
    }

    /// A result that references `mr`
    pub fn with_merge_request(
        project: &str,
        status: ResultStatus,
        mr: &MergeRequest,
        details: impl Into<String>,
    ) -> Self {
        Self {
            merge_request_id: Some(mr.id),
            merge_request_iid: Some(mr.iid),
            merge_request_url: Some(mr.web_url.clone()),
            details: Some(details.into()),
            ..Self::new(project, status)
        }
    }
}

/// Aggregate counts over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of projects processed
    pub total: usize,
    /// `CREATED`
    pub created: usize,
    /// `SKIPPED_EXISTS`
    pub skipped_exists: usize,
    /// `SKIPPED_DRAFT`
    pub skipped_draft: usize,
    /// `SKIPPED_NO_BRANCH`
    pub skipped_no_branch: usize,
    /// `SKIPPED_NO_CHANGE`
    pub skipped_no_change: usize,
    /// `ERROR`
    pub errors: usize,
}

impl Summary {
    /// Tally a result list in one pass
    pub fn from_results(results: &[ProjectResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.record(result.status);
            summary
        })
    }

    /// Count one result
    pub const fn record(&mut self, status: ResultStatus) {
        self.total += 1;
        match status {
            ResultStatus::Created => self.created += 1,
            ResultStatus::SkippedExists => self.skipped_exists += 1,
            ResultStatus::SkippedDraft => self.skipped_draft += 1,
            ResultStatus::SkippedNoBranch => self.skipped_no_branch += 1,
            ResultStatus::SkippedNoChange => self.skipped_no_change += 1,
            ResultStatus::Error => self.errors += 1,
        }
    }

    /// Sum of the per-status counters (always equals `total`)
    pub const fn counted(&self) -> usize {
        self.created
            + self.skipped_exists
            + self.skipped_draft
            + self.skipped_no_branch
            + self.skipped_no_change
            + self.errors
    }

    /// Whether the run should exit non-zero
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Full run output, as printed by `--json`
#[derive(Debug, Clone, Serialize)]
pub struct BulkMrReport {
    /// Per-project results in input order
    pub results: Vec<ProjectResult>,
    /// Aggregate counts
    pub summary: Summary,
}
