// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # cspcheck - Content-Security-Policy domain checker
//!
//! Fetches the `Content-Security-Policy` header of a list of URLs and checks
//! that every required domain is allowed by its directive.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cspcheck::{Checker, CheckerConfig, RequiredDomains};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CheckerConfig::default();
//!     let required = RequiredDomains::load("domains.json")?;
//!     let urls = cspcheck::load_urls("urls.json")?;
//!
//!     let checker = Checker::new(&config)?;
//!     let results = checker.run(&urls, &required, &mut std::io::stdout()).await?;
//!     results.save(&config.output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The parsing and validation halves are pure and usable on their own:
//!
//! ```rust
//! use cspcheck::{CspPolicy, RequiredDomains, Status, Validator};
//!
//! let policy = CspPolicy::parse("script-src 'self' https://cdn.example.com");
//! let required: RequiredDomains =
//!     [("script-src".to_string(), vec!["cdn.example.com".to_string()])]
//!         .into_iter()
//!         .collect();
//!
//! let report = Validator::default().validate(&policy, &required);
//! assert_eq!(report.get("script-src").unwrap().status, Status::Passed);
//! ```

pub mod checker;
pub mod config;
pub mod csp;
pub mod error;
pub mod http;
pub mod input;
pub mod report;

// Re-exports for convenience

// Run loop
pub use checker::Checker;
pub use config::{CheckerConfig, DEFAULT_DOMAINS_FILE, DEFAULT_RESULTS_FILE};

// CSP
pub use csp::{CspPolicy, Directive, DuplicatePolicy, MatchMode};
pub use csp::{DirectiveResult, PolicyReport, Status, Validator};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{FetchedPolicy, HttpClient, HttpClientConfig, PolicySource, StaticSource};

// Inputs and results
pub use input::{load_urls, RequiredDomains};
pub use report::{write_report, write_summary, RunResults};

/// cspcheck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
