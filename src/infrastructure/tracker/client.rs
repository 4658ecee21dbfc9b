use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::retry::RetryPolicy;
use crate::domain::errors::{TrackerApiError, TrackerError, TrackerResult};
use crate::domain::models::wire;
use crate::domain::models::{
    Config, ConnectionProfile, IssueCreate, IssueCreated, IssueImport, IssueImported, IssueLink,
    IssueModel, IssueModify, IssueRelationship, IssueSearch, IssueTransited, RetryConfig,
};
use crate::domain::ports::{ConnectionRegistry, IssueTracker};
use crate::infrastructure::connection::{ConnectionResolver, StaticConnectionRegistry};
use crate::infrastructure::logging::SecretScrubber;

const ORG_ID_HEADER: &str = "x-org-id";

/// Configuration for the tracker HTTP client
#[derive(Debug, Clone)]
pub struct TrackerClientConfig {
    /// Connection id looked up in the registry on every call
    pub conn_id: String,

    /// API version path segment
    pub api_version: String,

    /// Attempt ceiling and backoff
    pub retry: RetryConfig,

    /// TCP connect timeout in milliseconds
    pub connect_timeout_ms: u64,

    /// Whole-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for TrackerClientConfig {
    fn default() -> Self {
        Self::from_config(&Config::default(), None)
    }
}

impl TrackerClientConfig {
    /// Build client settings from the loaded configuration.
    ///
    /// `conn_id` overrides the configured default connection.
    pub fn from_config(config: &Config, conn_id: Option<&str>) -> Self {
        Self {
            conn_id: conn_id.map_or_else(|| config.default_connection.clone(), str::to_string),
            api_version: config.api_version.clone(),
            retry: config.retry.clone(),
            connect_timeout_ms: config.transport.connect_timeout_secs.saturating_mul(1000),
            timeout_ms: config.transport.timeout_secs.saturating_mul(1000),
        }
    }
}

/// One HTTP session, alive for a single attempt.
///
/// Dropping it releases the underlying connection pool, so every exit path of
/// an attempt closes the session.
struct Session {
    http: ReqwestClient,
    base_url: String,
}

/// Retrying client for the tracker issue API
///
/// Every call:
/// - validates and encodes the request once
/// - resolves the connection and opens a fresh session per attempt
/// - retries connect timeouts and HTTP error statuses under the retry policy
/// - decodes the response into the declared schema
pub struct TrackerClient {
    resolver: ConnectionResolver,
    conn_id: String,
    api_version: String,
    retry_policy: RetryPolicy,
    connect_timeout: Duration,
    timeout: Duration,
    scrubber: SecretScrubber,
}

impl TrackerClient {
    /// Create a client reading connections from `registry`
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use yatracker::domain::models::ConnectionRecord;
    /// use yatracker::infrastructure::connection::StaticConnectionRegistry;
    /// use yatracker::infrastructure::tracker::{TrackerClient, TrackerClientConfig};
    ///
    /// let registry = StaticConnectionRegistry::new().with_connection(
    ///     "yatracker_default",
    ///     ConnectionRecord::new("https://api.tracker.yandex.net", "token", "org-id"),
    /// );
    /// let client = TrackerClient::new(Arc::new(registry), TrackerClientConfig::default());
    /// assert_eq!(client.conn_id(), "yatracker_default");
    /// ```
    pub fn new(registry: Arc<dyn ConnectionRegistry>, config: TrackerClientConfig) -> Self {
        debug!(
            conn_id = %config.conn_id,
            api_version = %config.api_version,
            max_attempts = config.retry.max_attempts,
            "initializing tracker client"
        );

        Self {
            resolver: ConnectionResolver::new(registry),
            retry_policy: RetryPolicy::from_config(&config.retry),
            conn_id: config.conn_id,
            api_version: config.api_version,
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
            timeout: Duration::from_millis(config.timeout_ms),
            scrubber: SecretScrubber::new(),
        }
    }

    /// Create a client whose registry is the `connections` section of `config`.
    pub fn from_config(config: &Config, conn_id: Option<&str>) -> Self {
        Self::new(
            Arc::new(StaticConnectionRegistry::from_config(config)),
            TrackerClientConfig::from_config(config, conn_id),
        )
    }

    /// Replace the retry policy (e.g. to install a custom predicate).
    #[must_use]
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn conn_id(&self) -> &str {
        &self.conn_id
    }

    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Import an issue: `POST /{v}/issues/_import`
    #[instrument(skip(self, request), fields(conn_id = %self.conn_id))]
    pub async fn import_issue(&self, request: &IssueImport) -> TrackerResult<IssueImported> {
        let body = wire::encode(request)?;
        self.call(Method::POST, &["issues", "_import"], Some(body)).await
    }

    /// Create an issue: `POST /{v}/issues/`
    #[instrument(skip(self, request), fields(conn_id = %self.conn_id))]
    pub async fn create_issue(&self, request: &IssueCreate) -> TrackerResult<IssueCreated> {
        let body = wire::encode(request)?;
        self.call(Method::POST, &["issues", ""], Some(body)).await
    }

    /// Edit an issue: `PATCH /{v}/issues/{issue_id}`
    #[instrument(skip(self, request), fields(conn_id = %self.conn_id))]
    pub async fn edit_issue(
        &self,
        issue_id: &str,
        request: &IssueModify,
    ) -> TrackerResult<IssueModel> {
        let body = wire::encode(request)?;
        self.call(Method::PATCH, &["issues", issue_id], Some(body))
            .await
    }

    /// Link issues: `POST /{v}/issues/{issue_id}/links`
    #[instrument(skip(self, request), fields(conn_id = %self.conn_id))]
    pub async fn link_issues(
        &self,
        issue_id: &str,
        request: &IssueLink,
    ) -> TrackerResult<IssueRelationship> {
        let body = wire::encode(request)?;
        self.call(Method::POST, &["issues", issue_id, "links"], Some(body))
            .await
    }

    /// Execute a transition:
    /// `POST /{v}/issues/{issue_id}/transitions/{transition_id}/_execute` (no body)
    #[instrument(skip(self), fields(conn_id = %self.conn_id))]
    pub async fn transit_issue(
        &self,
        issue_id: &str,
        transition_id: i64,
    ) -> TrackerResult<IssueTransited> {
        let transition_id = transition_id.to_string();
        let path = ["issues", issue_id, "transitions", transition_id.as_str(), "_execute"];
        self.call(Method::POST, &path, None).await
    }

    /// Search issues: `POST /{v}/issues/_search`
    #[instrument(skip(self, request), fields(conn_id = %self.conn_id))]
    pub async fn search_issue(&self, request: &IssueSearch) -> TrackerResult<IssueModel> {
        let body = wire::encode(request)?;
        self.call(Method::POST, &["issues", "_search"], Some(body)).await
    }

    /// Direct execution entry point, reserved and not implemented.
    pub fn run(&self) -> TrackerResult<()> {
        Err(TrackerError::NotImplemented("run"))
    }

    /// Run one logical operation under the retry policy.
    ///
    /// `path` is the list of segments after the API version; each one is
    /// percent-encoded on its own.
    async fn call<T>(
        &self,
        method: Method,
        path: &[&str],
        body: Option<String>,
    ) -> TrackerResult<T>
    where
        T: DeserializeOwned,
    {
        self.retry_policy
            .execute(|| self.attempt(method.clone(), path, body.as_deref()))
            .await
    }

    /// A single attempt: resolve, open session, send, decode.
    async fn attempt<T>(
        &self,
        method: Method,
        path: &[&str],
        body: Option<&str>,
    ) -> TrackerResult<T>
    where
        T: DeserializeOwned,
    {
        let session = self.open_session()?;
        let url = self.endpoint(&session.base_url, path)?;

        debug!(%method, %url, "sending tracker request");

        let mut request = session.http.request(method, url);
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.to_owned());
        }

        let response = request.send().await.map_err(TrackerApiError::from_transport)?;
        let status = response.status();
        debug!(%status, "tracker response received");

        if status.is_client_error() || status.is_server_error() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!(
                %status,
                body = %self.scrubber.scrub_message(&body),
                "tracker API returned an error status"
            );
            return Err(TrackerApiError::Status { status, body }.into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(TrackerApiError::from_transport)?;
        Ok(wire::decode(&bytes)?)
    }

    fn open_session(&self) -> TrackerResult<Session> {
        let profile = self.resolver.resolve(&self.conn_id)?;
        let headers = session_headers(&profile)?;

        let http = ReqwestClient::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(TrackerApiError::Transport)?;

        Ok(Session {
            http,
            base_url: profile.base_url,
        })
    }

    fn endpoint(&self, base_url: &str, path: &[&str]) -> Result<Url, TrackerApiError> {
        let root = format!("{base_url}/{}", self.api_version);
        let mut url = Url::parse(&root).map_err(|e| TrackerApiError::InvalidUrl {
            reason: e.to_string(),
            url: root.clone(),
        })?;
        url.path_segments_mut()
            .map_err(|()| TrackerApiError::InvalidUrl {
                reason: "base URL cannot carry a path".to_string(),
                url: root,
            })?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }
}

/// `Authorization: OAuth <token>` and `X-Org-Id: <org>`.
///
/// The content type is set per request, only when a body is attached.
fn session_headers(profile: &ConnectionProfile) -> Result<HeaderMap, TrackerApiError> {
    let mut authorization = HeaderValue::from_str(&format!("OAuth {}", profile.token))
        .map_err(|_| TrackerApiError::InvalidHeader {
            name: "Authorization",
        })?;
    authorization.set_sensitive(true);

    let mut org_id = HeaderValue::from_str(&profile.org_id)
        .map_err(|_| TrackerApiError::InvalidHeader { name: "X-Org-Id" })?;
    org_id.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, authorization);
    headers.insert(HeaderName::from_static(ORG_ID_HEADER), org_id);
    Ok(headers)
}

#[async_trait]
impl IssueTracker for TrackerClient {
    async fn import_issue(&self, request: &IssueImport) -> TrackerResult<IssueImported> {
        Self::import_issue(self, request).await
    }

    async fn create_issue(&self, request: &IssueCreate) -> TrackerResult<IssueCreated> {
        Self::create_issue(self, request).await
    }

    async fn edit_issue(&self, issue_id: &str, request: &IssueModify) -> TrackerResult<IssueModel> {
        Self::edit_issue(self, issue_id, request).await
    }

    async fn link_issues(
        &self,
        issue_id: &str,
        request: &IssueLink,
    ) -> TrackerResult<IssueRelationship> {
        Self::link_issues(self, issue_id, request).await
    }

    async fn transit_issue(
        &self,
        issue_id: &str,
        transition_id: i64,
    ) -> TrackerResult<IssueTransited> {
        Self::transit_issue(self, issue_id, transition_id).await
    }

    async fn search_issue(&self, request: &IssueSearch) -> TrackerResult<IssueModel> {
        Self::search_issue(self, request).await
    }
}
