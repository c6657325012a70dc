// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Console summaries and the aggregate results file

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::csp::{PolicyReport, Status};
use crate::error::{Error, Result};

/// URL to per-directive results, in the order URLs were checked
#[derive(Debug, Clone, Default)]
pub struct RunResults {
    entries: Vec<(String, PolicyReport)>,
    skipped: Vec<String>,
}

impl RunResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record results for a URL that produced a policy
    ///
    /// A URL checked twice keeps its first position and its latest report.
    pub fn record(&mut self, url: impl Into<String>, report: PolicyReport) {
        let url = url.into();
        self.skipped.retain(|u| *u != url);
        match self.entries.iter().position(|(u, _)| *u == url) {
            Some(idx) => self.entries[idx].1 = report,
            None => self.entries.push((url, report)),
        }
    }

    /// Record a URL that produced no policy
    ///
    /// Results already recorded for the URL are kept.
    pub fn skip(&mut self, url: impl Into<String>) {
        let url = url.into();
        if self.get(&url).is_none() && !self.skipped.contains(&url) {
            self.skipped.push(url);
        }
    }

    pub fn get(&self, url: &str) -> Option<&PolicyReport> {
        self.entries
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, report)| report)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PolicyReport)> {
        self.entries.iter().map(|(url, report)| (url.as_str(), report))
    }

    /// URLs without a results entry
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Number of URLs with results
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Directives that did not pass, across all URLs
    pub fn failures(&self) -> usize {
        self.entries.iter().map(|(_, r)| r.failures()).sum()
    }

    /// Write pretty-printed JSON to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(path, json).map_err(|e| Error::output(path, e))?;
        tracing::info!(path = %path.display(), urls = self.len(), "Results written");
        Ok(())
    }
}

impl Serialize for RunResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (url, report) in &self.entries {
            map.serialize_entry(url, report)?;
        }
        map.end()
    }
}

/// Print one line per directive for a URL
pub fn write_report<W: Write>(out: &mut W, url: &str, report: &PolicyReport) -> io::Result<()> {
    writeln!(out, "{}", url)?;
    for (directive, result) in report.iter() {
        match result.status {
            Status::Passed => {
                writeln!(out, "  ✓ {}: all required domains present", directive)?
            }
            Status::Missing => writeln!(
                out,
                "  ✗ {}: missing {}",
                directive,
                result.missing.join(", ")
            )?,
            Status::Absent => writeln!(out, "  ✗ {}: directive absent", directive)?,
        }
    }
    writeln!(out)
}

/// Print the closing tally for a run
pub fn write_summary<W: Write>(out: &mut W, results: &RunResults) -> io::Result<()> {
    writeln!(
        out,
        "Summary: {} checked, {} skipped, {} failing directives",
        results.len(),
        results.skipped().len(),
        results.failures()
    )
}
