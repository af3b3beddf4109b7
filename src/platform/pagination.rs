//! Page-walking helpers

use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::Project;
use tracing::debug;

/// Fetch every project tagged with `topic`.
///
/// Walks pages from 1 until a page comes back empty or shorter than
/// `per_page`.
pub async fn list_all_projects_by_topic(
    platform: &dyn PlatformService,
    topic: &str,
    per_page: u32,
) -> Result<Vec<Project>> {
    let per_page = per_page.max(1);
    let mut projects = Vec::new();
    let mut page = 1;

    loop {
        let batch = platform.list_projects_by_topic(topic, page, per_page).await?;
        let fetched = batch.len();
        debug!(topic, page, fetched, "fetched project page");

        if fetched == 0 {
            break;
        }

        projects.extend(batch);

        if fetched < per_page as usize {
            break;
        }

        page += 1;
    }

    Ok(projects)
}
