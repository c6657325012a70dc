// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Checker configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::csp::{DuplicatePolicy, MatchMode};

/// Default file the aggregate results are written to
pub const DEFAULT_RESULTS_FILE: &str = "results.json";

/// Default file the converter writes requirements to
pub const DEFAULT_DOMAINS_FILE: &str = "domains.json";

/// Configuration for a checking run
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// User agent string
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Fall back to the report-only header when no enforcing policy is sent
    pub include_report_only: bool,
    /// Domain comparison
    pub match_mode: MatchMode,
    /// Handling of repeated directives
    pub duplicates: DuplicatePolicy,
    /// Where aggregate results are written
    pub output: PathBuf,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            user_agent: crate::http::DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            max_redirects: 10,
            include_report_only: false,
            match_mode: MatchMode::default(),
            duplicates: DuplicatePolicy::default(),
            output: PathBuf::from(DEFAULT_RESULTS_FILE),
        }
    }
}

impl CheckerConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set maximum redirects
    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Accept report-only policies when no enforcing one exists
    pub fn include_report_only(mut self, include: bool) -> Self {
        self.include_report_only = include;
        self
    }

    /// Set domain comparison mode
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Shorthand for host matching
    pub fn strict(self, strict: bool) -> Self {
        self.match_mode(if strict { MatchMode::Host } else { MatchMode::Substring })
    }

    /// Set duplicate directive policy
    pub fn duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Set results file
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}
