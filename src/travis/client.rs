use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CIGateError, Result};

use super::types::{ApiId, Build, RequestId};

/// Ceiling for a single API call; the poll loop handles the long waits, so
/// individual requests stay short.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Travis API v3 client scoped to a single repository.
#[derive(Clone)]
pub struct TravisClient {
    /// HTTP client with auth and version headers baked in
    client: Client,
    /// Base URL of the Travis API
    api_url: Url,
    /// Percent-encoded `owner/repo` slug
    repo_slug: String,
}

impl TravisClient {
    /// Create a new Travis API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Travis API base URL (e.g., "https://api.travis-ci.org")
    /// * `owner` - Repository owner/organization
    /// * `repo` - Repository name
    /// * `token` - Travis API token
    pub fn new(base_url: &str, owner: &str, repo: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Travis-API-Version", HeaderValue::from_static("3"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("token {token}")).map_err(|_| {
                CIGateError::Config(
                    "TRAVIS_TOKEN contains characters not allowed in a header".to_string(),
                )
            })?,
        );

        let client = Client::builder()
            .user_agent(concat!("cigate/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CIGateError::Config(format!("Failed to create HTTP client: {e}")))?;

        let api_url = Url::parse(base_url)
            .map_err(|e| CIGateError::Config(format!("Invalid API base URL: {e}")))?;

        let repo_slug = urlencoding::encode(&format!("{owner}/{repo}")).into_owned();

        Ok(Self {
            client,
            api_url,
            repo_slug,
        })
    }

    /// Submit a build request for a branch.
    ///
    /// Travis queues the build asynchronously; the returned request id is
    /// the token for looking up the build it eventually creates.
    pub async fn trigger_build(&self, branch: &str) -> Result<RequestId> {
        let url = self.repo_url("requests")?;
        debug!("Requesting a build of branch '{branch}'");

        let body = TriggerBody {
            request: TriggerRequest { branch },
        };

        let raw = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: TriggerResponse = serde_json::from_str(&raw)?;
        Ok(response.request.id)
    }

    /// Fetch the build created for an accepted request.
    ///
    /// A branch request maps to one build, so when Travis ever lists
    /// several the first one wins. An empty list is reported as
    /// `NotFound`; right after a trigger that usually just means the build
    /// has not materialized yet.
    pub async fn build_status(&self, request_id: &RequestId) -> Result<Build> {
        let url = self.repo_url(&format!("request/{request_id}"))?;
        debug!("Fetching build status for request '{request_id}'");

        let raw = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: StatusResponse = serde_json::from_str(&raw)?;
        response
            .builds
            .into_iter()
            .next()
            .ok_or_else(|| CIGateError::NotFound(request_id.to_string()))
    }

    /// Joins a repository-scoped path onto the API base.
    fn repo_url(&self, rest: &str) -> Result<Url> {
        self.api_url
            .join(&format!("repo/{}/{rest}", self.repo_slug))
            .map_err(|e| CIGateError::Config(format!("Invalid request URL: {e}")))
    }
}

/// Body of the build-creation request.
#[derive(Serialize)]
struct TriggerBody<'a> {
    request: TriggerRequest<'a>,
}

#[derive(Serialize)]
struct TriggerRequest<'a> {
    branch: &'a str,
}

/// Response from the build-creation endpoint.
#[derive(Deserialize)]
struct TriggerResponse {
    request: AcceptedRequest,
}

#[derive(Deserialize)]
struct AcceptedRequest {
    id: ApiId,
}

/// Response from the request-status endpoint.
#[derive(Deserialize)]
struct StatusResponse {
    builds: Vec<Build>,
}
