// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use super::response::Response;
use super::source::{FetchedPolicy, PolicySource};
use super::DEFAULT_USER_AGENT;
use crate::config::CheckerConfig;
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Fall back to `Content-Security-Policy-Report-Only`
    pub include_report_only: bool,
    /// Default headers
    pub default_headers: HeaderMap,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            "accept",
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            max_redirects: 10,
            include_report_only: false,
            default_headers,
        }
    }
}

impl From<&CheckerConfig> for HttpClientConfig {
    fn from(config: &CheckerConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            max_redirects: config.max_redirects,
            include_report_only: config.include_report_only,
            ..Default::default()
        }
    }
}

/// HTTP client that fetches response heads
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .default_headers(config.default_headers.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// Execute a GET request, returning the response head
    pub async fn get(&self, url: &str) -> Result<Response> {
        let parsed = Url::parse(url).map_err(|e| Error::url(url, e))?;
        let start = Instant::now();

        let response = self.client.get(parsed.clone()).send().await?;
        let response_time = start.elapsed().as_millis() as u64;

        let redirected = response.url() != &parsed;
        let final_url = response.url().clone();

        Ok(Response::new(
            response.status(),
            response.headers().clone(),
            final_url,
            redirected,
            response_time,
        ))
    }

    /// Fetch the policy header for a URL
    ///
    /// Returns `Ok(None)` when the server answers 200 without a policy.
    pub async fn fetch_policy(&self, url: &str) -> Result<Option<FetchedPolicy>> {
        tracing::info!(url, "Fetching");
        let response = self.get(url).await?;

        if !response.is_ok() {
            return Err(Error::unexpected_status(url, response.status_code()));
        }
        tracing::info!(
            url,
            status = response.status_code(),
            elapsed_ms = response.response_time_ms,
            redirected = response.redirected,
            "Request successful"
        );

        if let Some(header) = response.csp() {
            tracing::debug!(url, header = %header, "Content-Security-Policy found");
            return Ok(Some(FetchedPolicy::enforced(url, header)));
        }

        if self.config.include_report_only {
            if let Some(header) = response.csp_report_only() {
                tracing::warn!(url, "Only a report-only policy is present, checking it instead");
                tracing::debug!(url, header = %header, "Content-Security-Policy-Report-Only found");
                return Ok(Some(FetchedPolicy::report_only(url, header)));
            }
        }

        Ok(None)
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl PolicySource for HttpClient {
    async fn fetch(&self, url: &str) -> Result<Option<FetchedPolicy>> {
        self.fetch_policy(url).await
    }
}
