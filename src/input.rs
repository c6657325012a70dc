// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Input files: the URL list and the required-domains set
//!
//! Syntax errors and shape errors are reported separately, both naming the
//! offending file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::csp::split_directives;
use crate::error::{Error, Result};

/// Directive name to the domains it must allow, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredDomains {
    entries: Vec<(String, Vec<String>)>,
}

impl RequiredDomains {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON object of `directive -> [domain, ...]`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let value = read_json(path)?;

        let Value::Object(map) = value else {
            return Err(Error::invalid_input(
                path,
                "expected a JSON object mapping directive names to arrays of domains",
            ));
        };

        let mut required = Self::new();
        for (directive, domains) in map {
            let domains = string_array(path, &domains, &format!("directive '{}'", directive))?;
            required.insert(directive, domains);
        }
        Ok(required)
    }

    /// Requirements that a raw policy header satisfies exactly
    ///
    /// Names keep their header spelling. Directives without sources are left
    /// out, so an empty repeat never clears an earlier list; a later
    /// non-empty repeat replaces it.
    pub fn from_header(csp: &str) -> Self {
        split_directives(csp)
            .filter(|(_, sources)| !sources.is_empty())
            .map(|(name, sources)| {
                let sources = sources.into_iter().map(str::to_string).collect();
                (name.to_string(), sources)
            })
            .collect()
    }

    /// Add a directive; a repeated directive replaces the earlier list
    pub fn insert(&mut self, directive: impl Into<String>, domains: Vec<String>) {
        let directive = directive.into();
        match self.entries.iter().position(|(name, _)| *name == directive) {
            Some(idx) => self.entries[idx].1 = domains,
            None => self.entries.push((directive, domains)),
        }
    }

    pub fn get(&self, directive: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == directive)
            .map(|(_, domains)| domains.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, domains)| (name.as_str(), domains.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(path, json).map_err(|e| Error::output(path, e))
    }
}

impl FromIterator<(String, Vec<String>)> for RequiredDomains {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut required = Self::new();
        for (directive, domains) in iter {
            required.insert(directive, domains);
        }
        required
    }
}

impl Serialize for RequiredDomains {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (directive, domains) in &self.entries {
            map.serialize_entry(directive, domains)?;
        }
        map.end()
    }
}

/// Load a JSON array of URL strings
pub fn load_urls(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let value = read_json(path)?;
    string_array(path, &value, "top level")
}

fn read_json(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::invalid_input(path, format!("could not be read: {}", e)),
    })?;

    serde_json::from_str(&contents).map_err(|source| Error::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

fn string_array(path: &Path, value: &Value, what: &str) -> Result<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(Error::invalid_input(
            path,
            format!("{}: expected an array of strings", what),
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(Error::invalid_input(
                path,
                format!("{}: entry {} is not a string ({})", what, i, other),
            )),
        })
        .collect()
}
