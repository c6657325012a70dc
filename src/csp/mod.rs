// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Content Security Policy handling
//!
//! - Header parsing with an explicit duplicate-directive policy
//! - Domain comparison (loose substring or strict host)
//! - Validation of required domains per directive

mod matcher;
mod policy;
mod validator;

pub use matcher::{host_matches, matches, MatchMode};
pub use policy::{split_directives, CspPolicy, Directive, DuplicatePolicy};
pub use validator::{DirectiveResult, PolicyReport, Status, Validator};

/// Enforcing policy header
pub const CSP_HEADER: &str = "content-security-policy";

/// Report-only policy header
pub const CSP_REPORT_ONLY_HEADER: &str = "content-security-policy-report-only";
