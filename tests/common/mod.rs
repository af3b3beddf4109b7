//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{CompareCall, CreateMrCall, FindMrCall, MockPlatformService};

use gitlab_tools::types::{MergeRequest, MergeRequestState, Project};

/// Build a project fixture
pub fn make_project(id: u64, path: &str) -> Project {
    Project {
        id,
        name: path.rsplit('/').next().unwrap_or(path).to_string(),
        path_with_namespace: path.to_string(),
        web_url: format!("https://gitlab.example.com/{path}"),
        description: None,
        topics: Vec::new(),
    }
}

/// Build an open MR fixture
pub fn make_mr(iid: u64, title: &str, draft: bool, source: &str, target: &str) -> MergeRequest {
    MergeRequest {
        id: 1000 + iid,
        iid,
        title: title.to_string(),
        web_url: format!("https://gitlab.example.com/group/repo/-/merge_requests/{iid}"),
        state: MergeRequestState::Opened,
        draft,
        source_branch: source.to_string(),
        target_branch: target.to_string(),
        project_id: 0,
    }
}
