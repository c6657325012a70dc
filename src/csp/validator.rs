// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Required-domain validation against a parsed policy

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use super::matcher::MatchMode;
use super::policy::CspPolicy;
use crate::input::RequiredDomains;

/// Outcome for one required directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Every required domain is allowed by the directive
    Passed,
    /// The directive exists but some required domains are not allowed
    Missing,
    /// The directive does not exist in the policy
    Absent,
}

impl Status {
    pub fn is_passed(&self) -> bool {
        matches!(self, Status::Passed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Missing => "missing",
            Status::Absent => "absent",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation result for a single directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveResult {
    pub status: Status,
    /// Required domains not satisfied, in input order
    pub missing: Vec<String>,
}

impl DirectiveResult {
    pub fn passed() -> Self {
        Self {
            status: Status::Passed,
            missing: Vec::new(),
        }
    }

    pub fn missing(missing: Vec<String>) -> Self {
        Self {
            status: Status::Missing,
            missing,
        }
    }

    pub fn absent(required: &[String]) -> Self {
        Self {
            status: Status::Absent,
            missing: required.to_vec(),
        }
    }
}

/// Results for one policy, keyed by directive in required-set order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyReport {
    entries: Vec<(String, DirectiveResult)>,
}

impl PolicyReport {
    pub fn push(&mut self, directive: impl Into<String>, result: DirectiveResult) {
        self.entries.push((directive.into(), result));
    }

    /// Result for a directive, by exact name as given in the requirements
    pub fn get(&self, directive: &str) -> Option<&DirectiveResult> {
        self.entries
            .iter()
            .find(|(name, _)| name == directive)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectiveResult)> {
        self.entries.iter().map(|(name, result)| (name.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every directive passed
    pub fn all_passed(&self) -> bool {
        self.entries.iter().all(|(_, r)| r.status.is_passed())
    }

    /// Number of directives that did not pass
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|(_, r)| !r.status.is_passed()).count()
    }
}

impl Serialize for PolicyReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (directive, result) in &self.entries {
            map.serialize_entry(directive, result)?;
        }
        map.end()
    }
}

/// Checks required domains against a policy
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    mode: MatchMode,
}

impl Validator {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// Validate a single directive's required domains
    pub fn validate_directive(
        &self,
        policy: &CspPolicy,
        directive: &str,
        required: &[String],
    ) -> DirectiveResult {
        let Some(sources) = policy.get(directive) else {
            return DirectiveResult::absent(required);
        };

        let missing: Vec<String> = required
            .iter()
            .filter(|domain| {
                let found = sources.iter().any(|source| self.mode.matches(domain, source));
                tracing::trace!(directive, domain = %domain, found, "Checked required domain");
                !found
            })
            .cloned()
            .collect();

        if missing.is_empty() {
            DirectiveResult::passed()
        } else {
            DirectiveResult::missing(missing)
        }
    }

    /// Validate every directive of the requirement set
    pub fn validate(&self, policy: &CspPolicy, required: &RequiredDomains) -> PolicyReport {
        let mut report = PolicyReport::default();
        for (directive, domains) in required.iter() {
            let result = self.validate_directive(policy, directive, domains);
            tracing::debug!(directive, status = %result.status, missing = result.missing.len(), "Validated directive");
            report.push(directive, result);
        }
        report
    }
}
