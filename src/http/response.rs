// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

use crate::csp::{CSP_HEADER, CSP_REPORT_ONLY_HEADER};

/// Response head: the body is never read
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Final URL (after redirects)
    pub url: Url,
    /// Whether this was a redirect
    pub redirected: bool,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        url: Url,
        redirected: bool,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            url,
            redirected,
            response_time_ms,
        }
    }

    /// Only an exact 200 counts as success here
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get all values for a header
    ///
    /// Values are decoded as ISO-8859-1, so bytes outside visible ASCII
    /// are kept rather than dropping the whole value.
    pub fn header_all(&self, name: &str) -> Vec<String> {
        self.headers
            .get_all(name)
            .iter()
            .map(|v| v.as_bytes().iter().map(|&b| char::from(b)).collect())
            .collect()
    }

    /// Enforcing CSP, with repeated headers joined by `;`
    pub fn csp(&self) -> Option<String> {
        join_policies(self.header_all(CSP_HEADER))
    }

    /// Report-only CSP, with repeated headers joined by `;`
    pub fn csp_report_only(&self) -> Option<String> {
        join_policies(self.header_all(CSP_REPORT_ONLY_HEADER))
    }
}

fn join_policies(values: Vec<String>) -> Option<String> {
    let values: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join("; "))
    }
}
