//! Core types for gitlab-tools
//!
//! These mirror the subset of GitLab's v4 REST payloads the tool reads.

use serde::{Deserialize, Serialize};

/// A GitLab project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// Platform-assigned numeric ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Full path including namespace (e.g. `group/sub/repo`)
    pub path_with_namespace: String,
    /// Web URL of the project
    pub web_url: String,
    /// Project description
    #[serde(default)]
    pub description: Option<String>,
    /// Topics the project is tagged with
    #[serde(default)]
    pub topics: Vec<String>,
}

/// A GitLab topic, used to group related projects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    /// Topic ID
    pub id: u64,
    /// Topic name (the slug used in queries)
    pub name: String,
    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,
    /// Topic description
    #[serde(default)]
    pub description: Option<String>,
    /// Number of projects carrying this topic
    #[serde(default)]
    pub total_projects_count: u64,
}

/// MR state as reported by GitLab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeRequestState {
    /// Open and mergeable in principle
    Opened,
    /// Closed without merging
    Closed,
    /// Merged
    Merged,
    /// Locked while a merge is in flight
    Locked,
}

impl std::fmt::Display for MergeRequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opened => write!(f, "opened"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
            Self::Locked => write!(f, "locked"),
        }
    }
}

/// A merge request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergeRequest {
    /// Global ID
    pub id: u64,
    /// Project-scoped display number (`!iid`)
    pub iid: u64,
    /// MR title
    pub title: String,
    /// Web URL for the MR
    pub web_url: String,
    /// Current state
    pub state: MergeRequestState,
    /// GitLab's draft flag
    #[serde(default)]
    pub draft: bool,
    /// Source branch name
    pub source_branch: String,
    /// Target branch name
    pub target_branch: String,
    /// Owning project ID
    pub project_id: u64,
}

impl MergeRequest {
    /// Whether this MR counts as a draft (flag or legacy title prefix)
    pub fn is_draft(&self) -> bool {
        is_draft(self.draft, &self.title)
    }
}

/// Draft predicate shared by bulk creation and interactive merge.
///
/// True if `draft_flag` is set, or if the trimmed, lowercased title starts
/// with `draft:` or `wip:`.
pub fn is_draft(draft_flag: bool, title: &str) -> bool {
    if draft_flag {
        return true;
    }

    let title = title.trim().to_lowercase();
    title.starts_with("draft:") || title.starts_with("wip:")
}

/// A commit entry in a branch comparison
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commit {
    /// Full SHA
    pub id: String,
    /// Abbreviated SHA
    pub short_id: String,
    /// First line of the commit message
    pub title: String,
}

/// A file diff in a branch comparison
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Diff {
    /// Path before the change
    pub old_path: String,
    /// Path after the change
    pub new_path: String,
    /// File was added
    #[serde(default)]
    pub new_file: bool,
    /// File was renamed
    #[serde(default)]
    pub renamed_file: bool,
    /// File was deleted
    #[serde(default)]
    pub deleted_file: bool,
}

/// Result of comparing a source branch against a target branch
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchComparison {
    /// Commits the source branch adds on top of the target
    #[serde(default)]
    pub commits: Vec<Commit>,
    /// File-level diffs (informational only)
    #[serde(default)]
    pub diffs: Vec<Diff>,
}

impl BranchComparison {
    /// Whether the source branch has commits the target lacks.
    ///
    /// File diffs are not consulted.
    pub fn has_changes(&self) -> bool {
        !self.commits.is_empty()
    }
}
