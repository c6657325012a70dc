// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Run loop: fetch, parse and validate each URL in turn

use std::io::Write;

use crate::config::CheckerConfig;
use crate::csp::{CspPolicy, DuplicatePolicy, PolicyReport, Validator};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, PolicySource};
use crate::input::RequiredDomains;
use crate::report::{self, RunResults};

/// Checks URLs against a required-domains set
pub struct Checker<S = HttpClient> {
    source: S,
    validator: Validator,
    duplicates: DuplicatePolicy,
}

impl Checker<HttpClient> {
    /// Create a checker that fetches over HTTP
    pub fn new(config: &CheckerConfig) -> Result<Self> {
        let client = HttpClient::with_config(HttpClientConfig::from(config))?;
        Ok(Self::with_source(client, config))
    }
}

impl<S: PolicySource> Checker<S> {
    /// Create a checker over any policy source
    pub fn with_source(source: S, config: &CheckerConfig) -> Self {
        Self {
            source,
            validator: Validator::new(config.match_mode),
            duplicates: config.duplicates,
        }
    }

    /// Check one URL
    ///
    /// `Ok(None)` when the URL answered without a policy.
    pub async fn check_url(
        &self,
        url: &str,
        required: &RequiredDomains,
    ) -> Result<Option<PolicyReport>> {
        let Some(fetched) = self.source.fetch(url).await? else {
            return Ok(None);
        };

        let policy = CspPolicy::parse_with(&fetched.header, self.duplicates);
        tracing::debug!(
            url,
            directives = policy.len(),
            report_only = fetched.report_only,
            "Parsed policy"
        );

        Ok(Some(self.validator.validate(&policy, required)))
    }

    /// Check every URL in order, printing each report to `out`
    ///
    /// Failed fetches and URLs without a policy are logged and skipped; they
    /// get no entry in the returned results.
    pub async fn run<W: Write>(
        &self,
        urls: &[String],
        required: &RequiredDomains,
        out: &mut W,
    ) -> Result<RunResults> {
        let mut results = RunResults::new();

        for url in urls {
            match self.check_url(url, required).await {
                Ok(Some(policy_report)) => {
                    report::write_report(out, url, &policy_report)?;
                    results.record(url.clone(), policy_report);
                }
                Ok(None) => {
                    tracing::warn!(url = %url, "No Content-Security-Policy header, skipping");
                    results.skip(url.clone());
                }
                Err(e) if e.is_timeout() => {
                    tracing::error!(url = %url, error = %e, "Request timed out, skipping");
                    results.skip(url.clone());
                }
                Err(e) if e.is_network() => {
                    tracing::error!(url = %url, error = %e, "Request failed, skipping");
                    results.skip(url.clone());
                }
                Err(e) => {
                    tracing::warn!(url = %url, status = ?e.status_code(), error = %e, "Skipping");
                    results.skip(url.clone());
                }
            }
        }

        Ok(results)
    }
}
