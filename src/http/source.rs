// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Where raw policies come from
//!
//! The checker only needs "URL in, header value out". `HttpClient` is the
//! real implementation; `StaticSource` serves captured headers.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{Error, Result};

/// A raw policy header obtained for a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPolicy {
    /// URL the policy was requested for
    pub url: String,
    /// Raw header value
    pub header: String,
    /// Whether the value came from the report-only header
    pub report_only: bool,
}

impl FetchedPolicy {
    /// Policy from `Content-Security-Policy`
    pub fn enforced(url: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            header: header.into(),
            report_only: false,
        }
    }

    /// Policy from `Content-Security-Policy-Report-Only`
    pub fn report_only(url: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            header: header.into(),
            report_only: true,
        }
    }
}

/// Source of CSP headers keyed by URL
#[async_trait]
pub trait PolicySource: Send + Sync {
    /// Fetch the policy for a URL
    ///
    /// `Ok(None)` means the URL was reachable but sent no policy.
    async fn fetch(&self, url: &str) -> Result<Option<FetchedPolicy>>;
}

/// In-memory source of captured headers
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    policies: HashMap<String, Option<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `header` for `url`
    pub fn with_policy(mut self, url: impl Into<String>, header: impl Into<String>) -> Self {
        self.policies.insert(url.into(), Some(header.into()));
        self
    }

    /// Serve a response without a policy for `url`
    pub fn without_policy(mut self, url: impl Into<String>) -> Self {
        self.policies.insert(url.into(), None);
        self
    }
}

#[async_trait]
impl PolicySource for StaticSource {
    async fn fetch(&self, url: &str) -> Result<Option<FetchedPolicy>> {
        match self.policies.get(url) {
            Some(Some(header)) => Ok(Some(FetchedPolicy::enforced(url, header.clone()))),
            Some(None) => Ok(None),
            None => Err(Error::unexpected_status(url, 404)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source() {
        let source = StaticSource::new()
            .with_policy("https://a.com", "default-src 'self'")
            .without_policy("https://b.com");

        let fetched = tokio_test::block_on(source.fetch("https://a.com")).unwrap();
        assert_eq!(
            fetched,
            Some(FetchedPolicy::enforced("https://a.com", "default-src 'self'"))
        );

        assert_eq!(tokio_test::block_on(source.fetch("https://b.com")).unwrap(), None);

        let err = tokio_test::block_on(source.fetch("https://c.com")).unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }
}
