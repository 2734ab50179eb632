//! Access to Tailwind CSS releases published on GitHub.

use anyhow::{bail, Context};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::platform::Platform;
use crate::Result;

pub const REPOSITORY: &str = "tailwindlabs/tailwindcss";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Which release to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadTarget {
    /// Whatever GitHub currently marks as the latest release
    Latest,

    /// A specific release tag
    Pinned(String),
}

impl DownloadTarget {
    pub fn new(version_override: Option<&str>) -> Self {
        version_override
            .map(|version| Self::Pinned(version.into()))
            .unwrap_or(Self::Latest)
    }
}

/// HTTP client for the GitHub API and release downloads.
#[derive(Debug, Clone)]
pub struct Releases {
    http_client: reqwest::Client,
    api_base_url: String,
    download_base_url: String,
    github_token: Option<String>,
}

impl Releases {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .with_context(|| "failed to create HTTP client")?;

        Ok(Self {
            http_client,
            api_base_url: config.api_base_url.trim_end_matches('/').into(),
            download_base_url: config.download_base_url.trim_end_matches('/').into(),
            github_token: config.github_token.clone(),
        })
    }

    /// URL of the endpoint listing the repository's tags, newest first.
    pub fn tags_url(&self) -> String {
        format!("{}/repos/{REPOSITORY}/tags", self.api_base_url)
    }

    /// URL of the release artifact for the given target and platform.
    pub fn download_url(&self, target: &DownloadTarget, platform: &Platform) -> String {
        let artifact_name = platform.artifact_name();
        match target {
            DownloadTarget::Latest => format!(
                "{}/{REPOSITORY}/releases/latest/download/{artifact_name}",
                self.download_base_url
            ),
            DownloadTarget::Pinned(version) => format!(
                "{}/{REPOSITORY}/releases/download/{version}/{artifact_name}",
                self.download_base_url
            ),
        }
    }

    /// Sends a request to the GitHub API and checks the response status.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_api(&self, url: &str) -> Result<Response> {
        let mut request = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.github_token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        Self::send(request, url).await
    }

    /// Starts downloading a release artifact and checks the response status.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_artifact(&self, url: &str) -> Result<Response> {
        Self::send(self.http_client.get(url), url).await
    }

    async fn send(request: RequestBuilder, url: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("failed to send request to {url}"))?;
        debug!(status = %response.status());

        if !response.status().is_success() {
            bail!("bad response code: {} (from {url})", response.status());
        }
        Ok(response)
    }
}
