//! Bulk merge-request engine
//!
//! Same gather/plan/execute split as the merge session:
//! 1. Configure - validate a `BulkMrConfig` (fatal errors only here)
//! 2. Plan - pure decisions over fetched data (`plan`)
//! 3. Execute - walk projects in order, one `ProjectResult` each

mod config;
mod execute;
mod plan;
mod progress;
mod result;

pub use config::{BulkMrConfig, expand_project_paths, validate_branches};
pub use execute::process_projects;
pub use plan::{
    ExistingMergeRequest, classify_open_merge_requests, merge_request_description,
    merge_request_title,
};
pub use progress::{Checkpoint, NoopProgress, ProgressCallback};
pub use result::{BulkMrReport, ProjectResult, ResultStatus, Summary};
