// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Content Security Policy parsing
//!
//! Splits a raw header value into directives and their source tokens. No
//! attempt is made to validate the CSP grammar: keywords, nonces and hashes
//! are carried through as opaque tokens.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Error;

/// How a directive that appears more than once is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Later occurrence replaces the earlier source list
    #[default]
    LastWins,
    /// Later occurrences are ignored, as browsers do
    FirstWins,
    /// Sources of all occurrences are combined, without repeats
    Merge,
}

impl DuplicatePolicy {
    /// Name used on the command line and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::LastWins => "last",
            DuplicatePolicy::FirstWins => "first",
            DuplicatePolicy::Merge => "merge",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "last" | "last-wins" => Ok(DuplicatePolicy::LastWins),
            "first" | "first-wins" => Ok(DuplicatePolicy::FirstWins),
            "merge" => Ok(DuplicatePolicy::Merge),
            other => Err(Error::config(format!(
                "unknown duplicate policy '{}' (expected last, first or merge)",
                other
            ))),
        }
    }
}

/// Split a header value into directive names and their source tokens
///
/// Empty segments are skipped. Names keep the case used in the header.
pub fn split_directives(csp: &str) -> impl Iterator<Item = (&str, Vec<&str>)> {
    csp.split(';').filter_map(|segment| {
        let mut parts = segment.split_whitespace();
        let name = parts.next()?;
        Some((name, parts.collect()))
    })
}

/// A single parsed directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Lowercased directive name, e.g. `script-src`
    pub name: String,
    /// Source tokens in header order
    pub sources: Vec<String>,
}

/// Parsed CSP: directive name to ordered source tokens
///
/// Directives keep the order in which they first appeared in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CspPolicy {
    directives: Vec<Directive>,
}

impl CspPolicy {
    /// Parse a header value, resolving repeated directives with `LastWins`
    pub fn parse(csp: &str) -> Self {
        Self::parse_with(csp, DuplicatePolicy::default())
    }

    /// Parse a header value with an explicit duplicate policy
    pub fn parse_with(csp: &str, duplicates: DuplicatePolicy) -> Self {
        let mut policy = CspPolicy::default();

        for (name, sources) in split_directives(csp) {
            let sources = sources.into_iter().map(str::to_string).collect();
            policy.insert(name.to_ascii_lowercase(), sources, duplicates);
        }

        policy
    }

    fn insert(&mut self, name: String, sources: Vec<String>, duplicates: DuplicatePolicy) {
        let Some(idx) = self.directives.iter().position(|d| d.name == name) else {
            self.directives.push(Directive { name, sources });
            return;
        };
        let existing = &mut self.directives[idx];

        tracing::warn!(
            directive = %existing.name,
            policy = %duplicates,
            "Directive appears more than once"
        );

        match duplicates {
            DuplicatePolicy::LastWins => existing.sources = sources,
            DuplicatePolicy::FirstWins => {}
            DuplicatePolicy::Merge => {
                for source in sources {
                    if !existing.sources.contains(&source) {
                        existing.sources.push(source);
                    }
                }
            }
        }
    }

    /// Sources for a directive, looked up case-insensitively
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.directives
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .map(|d| d.sources.as_slice())
    }

    /// Check whether a directive is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate directives in header order
    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter()
    }

    /// Number of distinct directives
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

impl Serialize for CspPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.directives.len()))?;
        for directive in &self.directives {
            map.serialize_entry(&directive.name, &directive.sources)?;
        }
        map.end()
    }
}
