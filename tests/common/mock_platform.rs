//! Mock platform service for testing

use async_trait::async_trait;
use gitlab_tools::error::{Error, Result};
use gitlab_tools::platform::PlatformService;
use gitlab_tools::types::{
    BranchComparison, Commit, MergeRequest, MergeRequestState, Project, Topic,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `find_open_merge_requests`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindMrCall {
    pub project_id: u64,
    pub source: String,
    pub target: String,
}

/// Call record for `compare_branches`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareCall {
    pub project_id: u64,
    pub source: String,
    pub target: String,
}

/// Call record for `create_merge_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMrCall {
    pub project_id: u64,
    pub source: String,
    pub target: String,
    pub title: String,
    pub description: String,
}

/// In-memory GitLab double
///
/// Features:
/// - Projects, branches, open MRs and comparisons per project
/// - Created MRs become open MRs, so reruns see them
/// - Call tracking for verification
/// - Error injection per operation
///
/// Projects without an explicit comparison compare as one commit ahead.
pub struct MockPlatformService {
    next_iid: AtomicU64,
    projects: Mutex<HashMap<String, Project>>,
    branches: Mutex<HashMap<u64, HashSet<String>>>,
    open_mrs: Mutex<HashMap<u64, Vec<MergeRequest>>>,
    comparisons: Mutex<HashMap<u64, BranchComparison>>,
    topics: Mutex<Vec<Topic>>,
    topic_projects: Mutex<HashMap<String, Vec<Project>>>,
    // Call tracking
    get_project_calls: Mutex<Vec<String>>,
    branch_exists_calls: Mutex<Vec<(u64, String)>>,
    find_mr_calls: Mutex<Vec<FindMrCall>>,
    compare_calls: Mutex<Vec<CompareCall>>,
    create_mr_calls: Mutex<Vec<CreateMrCall>>,
    list_projects_calls: Mutex<Vec<(String, u32, u32)>>,
    list_by_target_calls: Mutex<Vec<(u64, String)>>,
    accept_calls: Mutex<Vec<(u64, u64)>>,
    // Error injection, keyed by project ID (accept: by MR IID)
    error_on_branch_exists: Mutex<HashSet<u64>>,
    error_on_find_mrs: Mutex<HashSet<u64>>,
    error_on_compare: Mutex<HashSet<u64>>,
    error_on_create: Mutex<HashMap<u64, String>>,
    error_on_list_by_target: Mutex<HashSet<u64>>,
    error_on_accept: Mutex<HashSet<u64>>,
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatformService {
    /// Create an empty mock
    pub fn new() -> Self {
        Self {
            next_iid: AtomicU64::new(1),
            projects: Mutex::new(HashMap::new()),
            branches: Mutex::new(HashMap::new()),
            open_mrs: Mutex::new(HashMap::new()),
            comparisons: Mutex::new(HashMap::new()),
            topics: Mutex::new(Vec::new()),
            topic_projects: Mutex::new(HashMap::new()),
            get_project_calls: Mutex::new(Vec::new()),
            branch_exists_calls: Mutex::new(Vec::new()),
            find_mr_calls: Mutex::new(Vec::new()),
            compare_calls: Mutex::new(Vec::new()),
            create_mr_calls: Mutex::new(Vec::new()),
            list_projects_calls: Mutex::new(Vec::new()),
            list_by_target_calls: Mutex::new(Vec::new()),
            accept_calls: Mutex::new(Vec::new()),
            error_on_branch_exists: Mutex::new(HashSet::new()),
            error_on_find_mrs: Mutex::new(HashSet::new()),
            error_on_compare: Mutex::new(HashSet::new()),
            error_on_create: Mutex::new(HashMap::new()),
            error_on_list_by_target: Mutex::new(HashSet::new()),
            error_on_accept: Mutex::new(HashSet::new()),
        }
    }

    // === Setup methods ===

    /// Register a project under `path`
    pub fn add_project(&self, path: &str, id: u64) {
        self.projects
            .lock()
            .unwrap()
            .insert(path.to_string(), super::make_project(id, path));
    }

    /// Register a project with the given branches
    pub fn add_project_with_branches(&self, path: &str, id: u64, branches: &[&str]) {
        self.add_project(path, id);
        self.add_branches(id, branches);
    }

    /// Add branches to a project
    pub fn add_branches(&self, project_id: u64, branches: &[&str]) {
        self.branches
            .lock()
            .unwrap()
            .entry(project_id)
            .or_default()
            .extend(branches.iter().map(ToString::to_string));
    }

    /// Add an open MR to a project
    pub fn add_merge_request(&self, project_id: u64, mut mr: MergeRequest) {
        mr.project_id = project_id;
        self.open_mrs
            .lock()
            .unwrap()
            .entry(project_id)
            .or_default()
            .push(mr);
    }

    /// Make `compare_branches` return `commits` commits for a project
    pub fn set_comparison(&self, project_id: u64, commits: usize) {
        let commits = (0..commits)
            .map(|i| Commit {
                id: format!("sha{i}"),
                short_id: format!("sha{i}"),
                title: format!("Commit {i}"),
            })
            .collect();
        self.comparisons.lock().unwrap().insert(
            project_id,
            BranchComparison {
                commits,
                diffs: Vec::new(),
            },
        );
    }

    /// Set the topics returned by `list_topics`
    pub fn set_topics(&self, topics: Vec<Topic>) {
        *self.topics.lock().unwrap() = topics;
    }

    /// Set the projects tagged with `topic`
    pub fn set_topic_projects(&self, topic: &str, projects: Vec<Project>) {
        self.topic_projects
            .lock()
            .unwrap()
            .insert(topic.to_string(), projects);
    }

    // === Error injection methods ===

    /// Make `branch_exists` fail for a project
    pub fn fail_branch_exists(&self, project_id: u64) {
        self.error_on_branch_exists.lock().unwrap().insert(project_id);
    }

    /// Make `find_open_merge_requests` fail for a project
    pub fn fail_find_mrs(&self, project_id: u64) {
        self.error_on_find_mrs.lock().unwrap().insert(project_id);
    }

    /// Make `compare_branches` fail for a project
    pub fn fail_compare(&self, project_id: u64) {
        self.error_on_compare.lock().unwrap().insert(project_id);
    }

    /// Make `create_merge_request` fail for a project with `msg`
    pub fn fail_create(&self, project_id: u64, msg: &str) {
        self.error_on_create
            .lock()
            .unwrap()
            .insert(project_id, msg.to_string());
    }

    /// Make `list_open_merge_requests_by_target` fail for a project
    pub fn fail_list_by_target(&self, project_id: u64) {
        self.error_on_list_by_target
            .lock()
            .unwrap()
            .insert(project_id);
    }

    /// Make `accept_merge_request` fail for an MR IID
    pub fn fail_accept(&self, iid: u64) {
        self.error_on_accept.lock().unwrap().insert(iid);
    }

    // === Call verification methods ===

    pub fn get_project_calls(&self) -> Vec<String> {
        self.get_project_calls.lock().unwrap().clone()
    }

    pub fn branch_exists_calls(&self) -> Vec<(u64, String)> {
        self.branch_exists_calls.lock().unwrap().clone()
    }

    pub fn find_mr_calls(&self) -> Vec<FindMrCall> {
        self.find_mr_calls.lock().unwrap().clone()
    }

    pub fn compare_calls(&self) -> Vec<CompareCall> {
        self.compare_calls.lock().unwrap().clone()
    }

    pub fn create_mr_calls(&self) -> Vec<CreateMrCall> {
        self.create_mr_calls.lock().unwrap().clone()
    }

    pub fn list_projects_calls(&self) -> Vec<(String, u32, u32)> {
        self.list_projects_calls.lock().unwrap().clone()
    }

    pub fn list_by_target_calls(&self) -> Vec<(u64, String)> {
        self.list_by_target_calls.lock().unwrap().clone()
    }

    pub fn accept_calls(&self) -> Vec<(u64, u64)> {
        self.accept_calls.lock().unwrap().clone()
    }

    /// Assert nothing past the branch checks was attempted
    pub fn assert_stopped_after_branch_checks(&self) {
        assert!(self.find_mr_calls().is_empty(), "unexpected MR query");
        assert!(self.compare_calls().is_empty(), "unexpected comparison");
        assert!(self.create_mr_calls().is_empty(), "unexpected creation");
    }
}

fn injected(op: &str, project_id: u64) -> Error {
    Error::Internal(format!("{op}: injected failure for project {project_id}"))
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_project(&self, path: &str) -> Result<Project> {
        self.get_project_calls.lock().unwrap().push(path.to_string());

        self.projects
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::Api {
                status: 404,
                body: r#"{"message":"404 Project Not Found"}"#.to_string(),
            })
    }

    async fn branch_exists(&self, project_id: u64, branch: &str) -> Result<bool> {
        self.branch_exists_calls
            .lock()
            .unwrap()
            .push((project_id, branch.to_string()));

        if self.error_on_branch_exists.lock().unwrap().contains(&project_id) {
            return Err(injected("branch_exists", project_id));
        }

        Ok(self
            .branches
            .lock()
            .unwrap()
            .get(&project_id)
            .is_some_and(|branches| branches.contains(branch)))
    }

    async fn compare_branches(
        &self,
        project_id: u64,
        source: &str,
        target: &str,
    ) -> Result<BranchComparison> {
        self.compare_calls.lock().unwrap().push(CompareCall {
            project_id,
            source: source.to_string(),
            target: target.to_string(),
        });

        if self.error_on_compare.lock().unwrap().contains(&project_id) {
            return Err(injected("compare_branches", project_id));
        }

        Ok(self
            .comparisons
            .lock()
            .unwrap()
            .get(&project_id)
            .cloned()
            .unwrap_or_else(|| BranchComparison {
                commits: vec![Commit {
                    id: "abc123".to_string(),
                    short_id: "abc123".to_string(),
                    title: "Test commit".to_string(),
                }],
                diffs: Vec::new(),
            }))
    }

    async fn find_open_merge_requests(
        &self,
        project_id: u64,
        source: &str,
        target: &str,
    ) -> Result<Vec<MergeRequest>> {
        self.find_mr_calls.lock().unwrap().push(FindMrCall {
            project_id,
            source: source.to_string(),
            target: target.to_string(),
        });

        if self.error_on_find_mrs.lock().unwrap().contains(&project_id) {
            return Err(injected("find_open_merge_requests", project_id));
        }

        Ok(self
            .open_mrs
            .lock()
            .unwrap()
            .get(&project_id)
            .map(|mrs| {
                mrs.iter()
                    .filter(|mr| mr.source_branch == source && mr.target_branch == target)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create_merge_request(
        &self,
        project_id: u64,
        source: &str,
        target: &str,
        title: &str,
        description: &str,
    ) -> Result<MergeRequest> {
        self.create_mr_calls.lock().unwrap().push(CreateMrCall {
            project_id,
            source: source.to_string(),
            target: target.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        });

        if let Some(msg) = self.error_on_create.lock().unwrap().get(&project_id) {
            return Err(Error::Api {
                status: 409,
                body: msg.clone(),
            });
        }

        let iid = self.next_iid.fetch_add(1, Ordering::SeqCst);
        let mr = MergeRequest {
            id: 5000 + iid,
            iid,
            title: title.to_string(),
            web_url: format!("https://gitlab.example.com/project-{project_id}/-/merge_requests/{iid}"),
            state: MergeRequestState::Opened,
            draft: false,
            source_branch: source.to_string(),
            target_branch: target.to_string(),
            project_id,
        };
        self.add_merge_request(project_id, mr.clone());
        Ok(mr)
    }

    async fn list_topics(&self, page: u32, per_page: u32) -> Result<Vec<Topic>> {
        let topics = self.topics.lock().unwrap();
        Ok(page_of(&topics, page, per_page))
    }

    async fn list_projects_by_topic(
        &self,
        topic: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Project>> {
        self.list_projects_calls
            .lock()
            .unwrap()
            .push((topic.to_string(), page, per_page));

        let topic_projects = self.topic_projects.lock().unwrap();
        Ok(topic_projects
            .get(topic)
            .map(|projects| page_of(projects, page, per_page))
            .unwrap_or_default())
    }

    async fn list_open_merge_requests_by_target(
        &self,
        project_id: u64,
        target: &str,
    ) -> Result<Vec<MergeRequest>> {
        self.list_by_target_calls
            .lock()
            .unwrap()
            .push((project_id, target.to_string()));

        if self.error_on_list_by_target.lock().unwrap().contains(&project_id) {
            return Err(injected("list_open_merge_requests_by_target", project_id));
        }

        Ok(self
            .open_mrs
            .lock()
            .unwrap()
            .get(&project_id)
            .map(|mrs| {
                mrs.iter()
                    .filter(|mr| mr.target_branch == target)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn accept_merge_request(&self, project_id: u64, iid: u64) -> Result<MergeRequest> {
        self.accept_calls.lock().unwrap().push((project_id, iid));

        if self.error_on_accept.lock().unwrap().contains(&iid) {
            return Err(Error::Api {
                status: 405,
                body: r#"{"message":"405 Method Not Allowed"}"#.to_string(),
            });
        }

        let mut open_mrs = self.open_mrs.lock().unwrap();
        let mrs = open_mrs.entry(project_id).or_default();
        let position = mrs
            .iter()
            .position(|mr| mr.iid == iid)
            .ok_or_else(|| Error::Internal(format!("no open MR !{iid} in project {project_id}")))?;

        let mut mr = mrs.remove(position);
        mr.state = MergeRequestState::Merged;
        Ok(mr)
    }
}

/// 1-based page slice
fn page_of<T: Clone>(items: &[T], page: u32, per_page: u32) -> Vec<T> {
    let start = (page.saturating_sub(1) as usize) * per_page as usize;
    items
        .iter()
        .skip(start)
        .take(per_page as usize)
        .cloned()
        .collect()
}
