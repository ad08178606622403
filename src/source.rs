//! Issue sources.
//!
//! Sources deliver raw issues in tracker order. Pull requests never make it
//! into the blog and are dropped here.

use reqwest::blocking::Client;
use reqwest::header;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Repository;
use crate::error::{Error, Result};
use crate::issue::RawIssue;

const GITHUB_API: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("issueblog/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding an optional GitHub token.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Provides raw issues for a build.
pub trait IssueSource {
    /// Returns raw issues in tracker order, without pull requests.
    ///
    /// # Errors
    ///
    /// Returns error if the issues cannot be loaded or decoded
    fn fetch(&self) -> Result<Vec<RawIssue>>;
}

/// Reads a saved response of the GitHub issues endpoint.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates source reading the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IssueSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<RawIssue>> {
        let text = fs::read_to_string(&self.path).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;
        let issues = parse_issues(&text)?;
        debug!(path = %self.path.display(), count = issues.len(), "Read issues from file");
        Ok(issues)
    }
}

/// Fetches open issues from the GitHub REST API.
///
/// Issues a single request for the first page of up to 100 open issues.
#[derive(Debug, Clone)]
pub struct GithubSource {
    client: Client,
    url: String,
    token: Option<String>,
}

impl GithubSource {
    /// Creates source for a repository.
    ///
    /// # Arguments
    ///
    /// * `repository`: Repository whose issues are fetched
    /// * `token`: Optional token sent as bearer authorization
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(repository: &Repository, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: issues_endpoint(repository),
            token: token.filter(|token| !token.is_empty()),
        })
    }

    /// Creates source reading the token from `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn from_env(repository: &Repository) -> Result<Self> {
        Self::new(repository, std::env::var(TOKEN_VAR).ok())
    }

    /// Request URL of the issues endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl IssueSource for GithubSource {
    fn fetch(&self) -> Result<Vec<RawIssue>> {
        info!(url = %self.url, authenticated = self.token.is_some(), "Fetching issues");

        let mut request = self
            .client
            .get(&self.url)
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let text = request.send()?.error_for_status()?.text()?;
        parse_issues(&text)
    }
}

/// Issues endpoint of a repository.
pub fn issues_endpoint(repository: &Repository) -> String {
    format!(
        "{}/repos/{}/{}/issues?state=open&per_page=100",
        GITHUB_API, repository.owner, repository.name
    )
}

/// Decodes issue JSON and drops pull requests.
fn parse_issues(text: &str) -> Result<Vec<RawIssue>> {
    let mut issues: Vec<RawIssue> = serde_json::from_str(text)?;
    issues.retain(|issue| !issue.is_pull_request());
    Ok(issues)
}

/// Keeps only issues opened by the given logins.
///
/// An empty list keeps everything.
pub fn retain_authors(issues: &mut Vec<RawIssue>, authors: &[String]) {
    if authors.is_empty() {
        return;
    }
    issues.retain(|issue| {
        issue
            .author()
            .is_some_and(|login| authors.iter().any(|author| author == login))
    });
}
