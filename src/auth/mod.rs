//! Authentication for GitLab
//!
//! Resolves the instance URL and personal access token from command-line
//! flags, environment variables and the config file, in that order.

use crate::config::FileConfig;
use crate::error::{Error, Result};

/// Environment variable holding the instance URL
pub const BASE_URL_ENV: &str = "GITLAB_BASE_URL";

/// Environment variable holding the personal access token
pub const TOKEN_ENV: &str = "GITLAB_TOKEN";

/// Source of a resolved setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Given on the command line
    Flag,
    /// Read from an environment variable
    EnvVar,
    /// Read from the config file
    ConfigFile,
}

/// Resolved GitLab connection settings
#[derive(Debug, Clone)]
pub struct GitLabAuthConfig {
    /// Instance root URL
    pub base_url: String,
    /// Personal access token
    pub token: String,
    /// Where the token came from
    pub token_source: AuthSource,
}

/// Resolve connection settings from flags, the process environment and `file`.
///
/// Empty strings count as unset at every level.
pub fn get_gitlab_auth(
    flag_url: Option<&str>,
    flag_token: Option<&str>,
    file: &FileConfig,
) -> Result<GitLabAuthConfig> {
    get_gitlab_auth_with_env(flag_url, flag_token, file, |key| std::env::var(key).ok())
}

/// Same as [`get_gitlab_auth`], reading environment variables through `env`
pub fn get_gitlab_auth_with_env<F>(
    flag_url: Option<&str>,
    flag_token: Option<&str>,
    file: &FileConfig,
    env: F,
) -> Result<GitLabAuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let (base_url, _) = resolve(flag_url, env(BASE_URL_ENV), file.base_url.as_deref())
        .ok_or_else(|| {
            Error::Auth(format!(
                "GitLab URL must be provided via --gitlab-url or {BASE_URL_ENV} env"
            ))
        })?;

    let (token, token_source) = resolve(flag_token, env(TOKEN_ENV), file.token.as_deref())
        .ok_or_else(|| {
            Error::Auth(format!(
                "GitLab token must be provided via --token or {TOKEN_ENV} env"
            ))
        })?;

    Ok(GitLabAuthConfig {
        base_url,
        token,
        token_source,
    })
}

fn resolve(
    flag: Option<&str>,
    env_value: Option<String>,
    file: Option<&str>,
) -> Option<(String, AuthSource)> {
    fn non_empty(value: &str) -> Option<String> {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    if let Some(value) = flag.and_then(non_empty) {
        return Some((value, AuthSource::Flag));
    }
    if let Some(value) = env_value.as_deref().and_then(non_empty) {
        return Some((value, AuthSource::EnvVar));
    }
    file.and_then(non_empty)
        .map(|value| (value, AuthSource::ConfigFile))
}
