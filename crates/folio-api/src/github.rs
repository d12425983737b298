// GitHub REST client - lists a user's public repositories
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Client label sent as the User-Agent on every request
pub const DEFAULT_USER_AGENT: &str = "portfolio-app";

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Upstream returned status {status}")]
    Upstream { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid client label: {0}")]
    InvalidUserAgent(String),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// One repository record as the listing endpoint returns it.
///
/// Only the fields the portfolio needs are kept; everything else in the
/// payload is ignored during decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GitHubRepo {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub fork: bool,
    pub html_url: String,
}

pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_base_url(user_agent, DEFAULT_API_BASE.to_string())
    }

    /// For GitHub Enterprise or a local stand-in server
    pub fn with_base_url(user_agent: &str, base_url: String) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_str(user_agent)
                .map_err(|_| GitHubError::InvalidUserAgent(user_agent.to_string()))?,
        );

        // No timeout: a hanging request keeps the caller waiting
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint listing the public repositories of `owner`
    pub fn repos_url(&self, owner: &str) -> String {
        format!(
            "{}/users/{}/repos",
            self.base_url,
            urlencoding::encode(owner)
        )
    }

    /// List the repositories of `owner`.
    ///
    /// Exactly one attempt is made. A non-2xx status is reported as
    /// [`GitHubError::Upstream`] without reading the body.
    pub async fn list_user_repos(&self, owner: &str) -> Result<Vec<GitHubRepo>> {
        let url = self.repos_url(owner);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        decode_repos(&body)
    }
}

/// Decode a listing response body into raw repository records
pub fn decode_repos(body: &str) -> Result<Vec<GitHubRepo>> {
    let repos: Vec<GitHubRepo> = serde_json::from_str(body)?;
    Ok(repos)
}
