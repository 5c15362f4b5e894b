//! Implements `ProfileLookup` against the GitHub REST API (`GET /users/{handle}`).

use crate::api::ProfileLookup;
use crate::model::Profile;
use crate::Result;
use anyhow::{anyhow, ensure, Context};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::trace;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Looks up user and organization profiles with an authenticated `reqwest::Client`. Every request
/// is bounded by the configured timeout.
pub(crate) struct GitHubProfiles {
    client: reqwest::Client,
    api_url: Url,
    token: String,
}

impl GitHubProfiles {
    pub(crate) fn new(api_url: &str, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        // A trailing slash makes `join` append to the base path instead of replacing it.
        let api_url = if api_url.ends_with('/') {
            Url::parse(api_url)
        } else {
            Url::parse(&format!("{api_url}/"))
        }
        .with_context(|| format!("Invalid GitHub API URL '{api_url}'"))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Unable to create the HTTP client")?;

        Ok(Self {
            client,
            api_url,
            token: token.into(),
        })
    }

    fn user_url(&self, handle: &str) -> Result<Url> {
        ensure!(is_valid_handle(handle), "Invalid GitHub handle '{handle}'");
        self.api_url
            .join(&format!("users/{handle}"))
            .with_context(|| format!("Unable to build the profile URL for '{handle}'"))
    }
}

#[async_trait::async_trait]
impl ProfileLookup for GitHubProfiles {
    async fn lookup(&mut self, handle: &str) -> Result<Option<Profile>> {
        let url = self.user_url(handle)?;
        trace!("GET {url}");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .with_context(|| format!("Failed to send the profile request for '{handle}'"))?;

        match Reply::from_status(response.status()) {
            Reply::Profile => {}
            Reply::NotFound => return Ok(None),
            Reply::Failed(status) => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read response body".to_string());
                return Err(request_failed(handle, status, &body));
            }
        }

        let user: GitHubUser = response
            .json()
            .await
            .with_context(|| format!("Failed to parse the GitHub profile of '{handle}'"))?;
        Ok(Some(user.into()))
    }
}

/// How a response status is handled before its body is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Profile,
    NotFound,
    Failed(StatusCode),
}

impl Reply {
    fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::NOT_FOUND {
            Reply::NotFound
        } else if status.is_success() {
            Reply::Profile
        } else {
            Reply::Failed(status)
        }
    }
}

fn request_failed(handle: &str, status: StatusCode, body: &str) -> anyhow::Error {
    anyhow!("GitHub API profile request for '{handle}' failed with status {status}: {body}")
}

/// The subset of the GitHub user object that we use.
#[derive(Debug, Clone, Deserialize)]
struct GitHubUser {
    name: Option<String>,
    avatar_url: Option<String>,
    html_url: Option<String>,
    blog: Option<String>,
    #[serde(rename = "type")]
    entity_type: Option<String>,
}

impl From<GitHubUser> for Profile {
    fn from(user: GitHubUser) -> Self {
        Profile {
            name: user.name.filter(|s| !s.trim().is_empty()),
            avatar_url: user.avatar_url.filter(|s| !s.is_empty()),
            profile_url: user.html_url.filter(|s| !s.is_empty()),
            website_url: user.blog.as_deref().and_then(website_url),
            entity_type: user.entity_type,
        }
    }
}

/// GitHub handles are alphanumeric with single inner hyphens, at most 39 characters.
fn is_valid_handle(handle: &str) -> bool {
    !handle.is_empty()
        && handle.len() <= 39
        && handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !handle.starts_with('-')
        && !handle.ends_with('-')
}

/// Normalizes the free-text `blog` field into an http(s) URL. Users often omit the scheme.
fn website_url(blog: &str) -> Option<String> {
    let blog = blog.trim();
    if blog.is_empty() {
        return None;
    }
    let candidate = if blog.starts_with("http://") || blog.starts_with("https://") {
        blog.to_string()
    } else {
        format!("https://{blog}")
    };
    let url = Url::parse(&candidate).ok()?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Some(url.to_string()),
        _ => None,
    }
}
