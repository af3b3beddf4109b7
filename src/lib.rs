//! gitlab-tools: bulk merge requests across GitLab projects
//!
//! The library holds the reconciliation engine that decides, per project,
//! whether a merge request should be created, and the GitLab REST gateway
//! it talks through. The `gitlab-tools` binary wires both to the terminal.

pub mod auth;
pub mod bulk;
pub mod config;
pub mod error;
pub mod merge;
pub mod platform;
pub mod types;
