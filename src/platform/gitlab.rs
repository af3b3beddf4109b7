//! GitLab platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{BranchComparison, MergeRequest, Project, Topic};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    base_url: String,
}

#[derive(Serialize)]
struct CreateMrPayload<'a> {
    source_branch: &'a str,
    target_branch: &'a str,
    title: &'a str,
    description: &'a str,
}

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 15;

impl GitLabService {
    /// Create a new GitLab service for a (self-hosted) instance.
    ///
    /// `base_url` is the instance root, e.g. `https://gitlab.example.com`.
    pub fn new(base_url: &str, token: String) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|e| Error::GitLabApi(format!("invalid GitLab URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::GitLabApi(format!(
                "invalid GitLab URL '{base_url}': scheme must be http or https"
            )));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::GitLabApi(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            base_url: trimmed.to_string(),
        })
    }

    /// Instance root this service talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v4{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?;
        debug!(url = %response.url(), status = response.status().as_u16(), "GitLab response");
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = error_for_status(self.send(request).await?).await?;
        Ok(response.json().await?)
    }
}

/// Turn a non-success response into [`Error::Api`], keeping GitLab's message
async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Api {
        status: status.as_u16(),
        body,
    })
}

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[async_trait]
impl PlatformService for GitLabService {
    async fn get_project(&self, path: &str) -> Result<Project> {
        debug!(path, "getting project");
        let url = self.api_url(&format!("/projects/{}", encode(path)));

        let project: Project = self.send_json(self.client.get(&url)).await?;
        debug!(project_id = project.id, "resolved project");
        Ok(project)
    }

    async fn branch_exists(&self, project_id: u64, branch: &str) -> Result<bool> {
        debug!(project_id, branch, "checking branch");
        let url = self.api_url(&format!(
            "/projects/{project_id}/repository/branches/{}",
            encode(branch)
        ));

        let response = self.send(self.client.get(&url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        error_for_status(response).await?;
        Ok(true)
    }

    async fn compare_branches(
        &self,
        project_id: u64,
        source: &str,
        target: &str,
    ) -> Result<BranchComparison> {
        debug!(project_id, source, target, "comparing branches");
        let url = self.api_url(&format!("/projects/{project_id}/repository/compare"));

        // GitLab's `from` is the base, `to` the head
        let comparison: BranchComparison = self
            .send_json(
                self.client
                    .get(&url)
                    .query(&[("from", target), ("to", source)]),
            )
            .await?;

        debug!(commits = comparison.commits.len(), "compared branches");
        Ok(comparison)
    }

    async fn find_open_merge_requests(
        &self,
        project_id: u64,
        source: &str,
        target: &str,
    ) -> Result<Vec<MergeRequest>> {
        debug!(project_id, source, target, "finding open MRs");
        let url = self.api_url(&format!("/projects/{project_id}/merge_requests"));

        let mrs: Vec<MergeRequest> = self
            .send_json(self.client.get(&url).query(&[
                ("state", "opened"),
                ("source_branch", source),
                ("target_branch", target),
            ]))
            .await?;

        debug!(count = mrs.len(), "found open MRs");
        Ok(mrs)
    }

    async fn create_merge_request(
        &self,
        project_id: u64,
        source: &str,
        target: &str,
        title: &str,
        description: &str,
    ) -> Result<MergeRequest> {
        debug!(project_id, source, target, "creating MR");
        let url = self.api_url(&format!("/projects/{project_id}/merge_requests"));

        let payload = CreateMrPayload {
            source_branch: source,
            target_branch: target,
            title,
            description,
        };

        let mr: MergeRequest = self.send_json(self.client.post(&url).json(&payload)).await?;
        debug!(mr_iid = mr.iid, "created MR");
        Ok(mr)
    }

    async fn list_topics(&self, page: u32, per_page: u32) -> Result<Vec<Topic>> {
        debug!(page, per_page, "listing topics");
        let url = self.api_url("/topics");

        self.send_json(
            self.client
                .get(&url)
                .query(&[("page", page), ("per_page", per_page)]),
        )
        .await
    }

    async fn list_projects_by_topic(
        &self,
        topic: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Project>> {
        debug!(topic, page, per_page, "listing projects by topic");
        let url = self.api_url("/projects");

        self.send_json(self.client.get(&url).query(&[
            ("topic", topic.to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ]))
        .await
    }

    async fn list_open_merge_requests_by_target(
        &self,
        project_id: u64,
        target: &str,
    ) -> Result<Vec<MergeRequest>> {
        debug!(project_id, target, "listing open MRs by target");
        let url = self.api_url(&format!("/projects/{project_id}/merge_requests"));

        self.send_json(
            self.client
                .get(&url)
                .query(&[("state", "opened"), ("target_branch", target)]),
        )
        .await
    }

    async fn accept_merge_request(&self, project_id: u64, iid: u64) -> Result<MergeRequest> {
        debug!(project_id, mr_iid = iid, "accepting MR");
        let url = self.api_url(&format!("/projects/{project_id}/merge_requests/{iid}/merge"));

        let mr: MergeRequest = self.send_json(self.client.put(&url)).await?;
        debug!(mr_iid = iid, state = %mr.state, "accepted MR");
        Ok(mr)
    }
}
