//! GitHub Issues bridge
//!
//! Imports issues of one GitHub repository through the REST API. There is no
//! exporter: pushing to GitHub is not supported.

use super::interfaces::{BridgeImpl, Configuration, Importer};
use crate::cache::{RepoCache, Status};
use crate::repository::RepoCommon;
use crate::{BridgeError, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};
use reqwest::blocking::Client;
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

/// Default REST endpoint (GitHub Enterprise uses `https://<host>/api/v3`)
pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub const KEY_USER: &str = "user";
pub const KEY_PROJECT: &str = "project";
pub const KEY_TOKEN: &str = "token";
pub const KEY_API_URL: &str = "api-url";

/// Metadata keys recorded on imported issues
pub const META_ORIGIN: &str = "origin";
pub const META_ID: &str = "github-id";
pub const META_URL: &str = "github-url";
pub const META_STATE: &str = "github-state";

/// Issues per page (the API maximum)
const PER_PAGE: usize = 100;
/// Per-request timeout for issue listing pages
const LIST_TIMEOUT: Duration = Duration::from_secs(30);
/// Per-request timeout for single issue fetches
const GET_TIMEOUT: Duration = Duration::from_secs(10);

/// The `github` connector
#[derive(Debug, Default)]
pub struct GitHub {
    importer: GitHubImporter,
}

impl GitHub {
    pub const TYPE: &'static str = "github";
}

impl BridgeImpl for GitHub {
    fn bridge_type(&self) -> &'static str {
        Self::TYPE
    }

    fn configure(&self, repo: &dyn RepoCommon) -> Result<Configuration> {
        let theme = ColorfulTheme::default();
        println!("Configuring a GitHub bridge for {}", repo.path().display());

        let user: String = Input::with_theme(&theme)
            .with_prompt("GitHub user or organization")
            .interact_text()?;

        let project: String = Input::with_theme(&theme)
            .with_prompt("Repository name")
            .interact_text()?;

        let env_token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let use_env_token = match env_token {
            Some(_) => Confirm::with_theme(&theme)
                .with_prompt("Use the token from GITHUB_TOKEN?")
                .default(true)
                .interact()?,
            None => false,
        };
        let token = match env_token {
            Some(token) if use_env_token => token,
            _ => Password::with_theme(&theme)
                .with_prompt("API token")
                .interact()?,
        };

        let api_url: String = Input::with_theme(&theme)
            .with_prompt("API URL")
            .default(DEFAULT_API_URL.to_string())
            .interact_text()?;

        build_configuration(&user, &project, &token, &api_url)
    }

    fn importer(&self) -> Option<&dyn Importer> {
        Some(&self.importer)
    }
}

/// Assemble a configuration from prompt answers, rejecting blank ones
pub fn build_configuration(
    user: &str,
    project: &str,
    token: &str,
    api_url: &str,
) -> Result<Configuration> {
    let mut conf = Configuration::new();
    for (key, value) in [
        (KEY_USER, user),
        (KEY_PROJECT, project),
        (KEY_TOKEN, token),
        (KEY_API_URL, api_url.trim_end_matches('/')),
    ] {
        let value = value.trim();
        if value.is_empty() {
            return Err(BridgeError::Config(format!("GitHub {} must not be empty", key)));
        }
        conf.insert(key.to_string(), value.to_string());
    }
    Ok(conf)
}

/// GitHub issue (REST API format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssue {
    pub number: u64,
    pub node_id: String,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub state: String,
    pub html_url: String,
    /// Present when the "issue" is really a pull request
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

/// Pulls issues from GitHub into the local cache
#[derive(Debug, Default)]
pub struct GitHubImporter;

impl Importer for GitHubImporter {
    fn import_all(&self, cache: &mut RepoCache, conf: &Configuration) -> Result<()> {
        let api = ApiClient::from_config(conf)?;
        let mut stats = ImportStats::default();

        let mut page = 1;
        loop {
            let issues = api.list_issues(page)?;
            for issue in &issues {
                stats.record(import_issue(cache, issue)?);
            }
            if is_last_page(issues.len()) {
                break;
            }
            page += 1;
        }

        info!(
            repo = %api.repo_slug(),
            imported = stats.imported,
            skipped = stats.skipped,
            "GitHub import finished"
        );
        Ok(())
    }

    fn import(&self, cache: &mut RepoCache, conf: &Configuration, id: &str) -> Result<()> {
        let number: u64 = id
            .trim_start_matches('#')
            .parse()
            .map_err(|_| BridgeError::Integration(format!("invalid GitHub issue number: {}", id)))?;

        let api = ApiClient::from_config(conf)?;
        let issue = api.get_issue(number)?;
        let imported = import_issue(cache, &issue)?;

        info!(repo = %api.repo_slug(), number, imported, "GitHub import finished");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ImportStats {
    imported: u32,
    skipped: u32,
}

impl ImportStats {
    fn record(&mut self, imported: bool) {
        if imported {
            self.imported += 1;
        } else {
            self.skipped += 1;
        }
    }
}

/// Create a local issue for `issue` unless it is a pull request or already imported
///
/// Returns whether an issue was created.
pub fn import_issue(cache: &mut RepoCache, issue: &GitHubIssue) -> Result<bool> {
    if issue.pull_request.is_some() {
        debug!(number = issue.number, "Skipping pull request");
        return Ok(false);
    }
    if cache.find_by_metadata(META_ID, &issue.node_id).is_some() {
        debug!(number = issue.number, "Already imported");
        return Ok(false);
    }

    let mut metadata = BTreeMap::new();
    metadata.insert(META_ORIGIN.to_string(), GitHub::TYPE.to_string());
    metadata.insert(META_ID.to_string(), issue.node_id.clone());
    metadata.insert(META_URL.to_string(), issue.html_url.clone());
    metadata.insert(META_STATE.to_string(), issue.state.clone());

    let body = issue.body.as_deref().unwrap_or_default();
    cache.new_issue_with_status(&issue.title, body, local_status(&issue.state), metadata)?;
    Ok(true)
}

/// Local status for a GitHub issue state ("open" or "closed")
fn local_status(state: &str) -> Status {
    if state.eq_ignore_ascii_case("closed") {
        Status::Closed
    } else {
        Status::Open
    }
}

/// A page shorter than the page size is the final one
fn is_last_page(count: usize) -> bool {
    count < PER_PAGE
}

/// Error for a non-success response about `resource`
fn error_for_status(status: StatusCode, resource: &str, body: &str) -> BridgeError {
    match status {
        StatusCode::UNAUTHORIZED => {
            BridgeError::Integration("GitHub authentication failed".to_string())
        }
        StatusCode::NOT_FOUND => BridgeError::Integration(format!("Not found: {}", resource)),
        status => BridgeError::Integration(format!("GitHub API error: HTTP {}: {}", status, body)),
    }
}

/// Minimal REST client for one repository
struct ApiClient {
    client: Client,
    api_url: String,
    user: String,
    project: String,
    token: String,
}

impl ApiClient {
    fn from_config(conf: &Configuration) -> Result<Self> {
        let required = |key: &str| {
            conf.get(key).cloned().ok_or_else(|| {
                BridgeError::Config(format!("GitHub bridge is missing the {:?} setting", key))
            })
        };

        let client = Client::builder()
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(
                    header::USER_AGENT,
                    header::HeaderValue::from_static("beadbridge/0.1"),
                );
                headers.insert(
                    header::ACCEPT,
                    header::HeaderValue::from_static("application/vnd.github+json"),
                );
                headers
            })
            .build()?;

        Ok(Self {
            client,
            api_url: conf
                .get(KEY_API_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            user: required(KEY_USER)?,
            project: required(KEY_PROJECT)?,
            token: required(KEY_TOKEN)?,
        })
    }

    fn repo_slug(&self) -> String {
        format!("{}/{}", self.user, self.project)
    }

    fn issues_url(&self) -> String {
        format!("{}/repos/{}/{}/issues", self.api_url, self.user, self.project)
    }

    fn list_issues(&self, page: u32) -> Result<Vec<GitHubIssue>> {
        debug!(repo = %self.repo_slug(), page, "Fetching GitHub issues page");

        let response = self
            .client
            .get(self.issues_url())
            .query(&[
                ("state", "all".to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ])
            .bearer_auth(&self.token)
            .timeout(LIST_TIMEOUT)
            .send()?;

        match response.status() {
            StatusCode::OK => Ok(response.json()?),
            status => Err(api_error(status, &self.repo_slug(), response)),
        }
    }

    fn get_issue(&self, number: u64) -> Result<GitHubIssue> {
        debug!(repo = %self.repo_slug(), number, "Fetching GitHub issue");

        let response = self
            .client
            .get(format!("{}/{}", self.issues_url(), number))
            .bearer_auth(&self.token)
            .timeout(GET_TIMEOUT)
            .send()?;

        let resource = format!("{}#{}", self.repo_slug(), number);
        match response.status() {
            StatusCode::OK => Ok(response.json()?),
            status => Err(api_error(status, &resource, response)),
        }
    }
}

fn api_error(status: StatusCode, resource: &str, response: reqwest::blocking::Response) -> BridgeError {
    let body = response.text().unwrap_or_default();
    error_for_status(status, resource, &body)
}
