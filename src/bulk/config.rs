//! Run configuration for a bulk MR run

use crate::error::{Error, Result};

/// Immutable per-run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkMrConfig {
    /// Source branch whose commits are proposed
    pub origin_branch: String,
    /// Branch the MRs target
    pub target_branch: String,
    /// Project paths, processed in order; duplicates are kept
    pub projects: Vec<String>,
    /// Whether progress checkpoints should be shown
    pub verbose: bool,
}

impl BulkMrConfig {
    /// Build a validated configuration.
    ///
    /// Fails if either branch name is empty or there are no projects.
    pub fn new(
        origin_branch: impl Into<String>,
        target_branch: impl Into<String>,
        projects: Vec<String>,
        verbose: bool,
    ) -> Result<Self> {
        let origin_branch = origin_branch.into();
        let target_branch = target_branch.into();

        validate_branches(&origin_branch, &target_branch)?;
        if projects.is_empty() {
            return Err(Error::Config(
                "at least one --project is required".to_string(),
            ));
        }

        Ok(Self {
            origin_branch,
            target_branch,
            projects,
            verbose,
        })
    }
}

/// Check that both branch names are non-empty
pub fn validate_branches(origin: &str, target: &str) -> Result<()> {
    if origin.trim().is_empty() {
        return Err(Error::Config("--origin is required".to_string()));
    }
    if target.trim().is_empty() {
        return Err(Error::Config("--target is required".to_string()));
    }
    Ok(())
}

/// Prefix bare project names with `group`.
///
/// Paths that already contain a `/` are left alone, as is everything when
/// `group` is `None` or empty.
pub fn expand_project_paths(group: Option<&str>, projects: &[String]) -> Vec<String> {
    let group = group.map(|g| g.trim().trim_end_matches('/')).filter(|g| !g.is_empty());

    projects
        .iter()
        .map(|project| match group {
            Some(group) if !project.contains('/') => format!("{group}/{project}"),
            _ => project.clone(),
        })
        .collect()
}
