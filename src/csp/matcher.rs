// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Domain comparison between a required domain and a CSP source token

use std::fmt;

/// How a required domain is compared against a source token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Scheme-stripped substring containment in either direction.
    ///
    /// Loose on purpose: `example.com` matches `cdn.example.com`, but also
    /// `evil-example.com`.
    #[default]
    Substring,
    /// Host equality or a dot-boundary subdomain relationship
    Host,
}

impl MatchMode {
    /// Check whether `required` is satisfied by `source`
    pub fn matches(&self, required: &str, source: &str) -> bool {
        match self {
            MatchMode::Substring => matches(required, source),
            MatchMode::Host => host_matches(required, source),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Substring => f.write_str("substring"),
            MatchMode::Host => f.write_str("host"),
        }
    }
}

/// Strip a leading `https://` and then a leading `http://`
fn strip_scheme(value: &str) -> &str {
    let value = value.strip_prefix("https://").unwrap_or(value);
    value.strip_prefix("http://").unwrap_or(value)
}

/// Loose comparison: either normalized string contains the other
pub fn matches(required: &str, source: &str) -> bool {
    let required = strip_scheme(required);
    let source = strip_scheme(source);
    required.contains(source) || source.contains(required)
}

/// Reduce a source or domain to a bare lowercase host
fn host_of(value: &str) -> String {
    let value = value.trim();
    let value = match value.find("://") {
        Some(idx) => &value[idx + 3..],
        None => value,
    };
    let end = value.find(['/', '?', '#']).unwrap_or(value.len());
    let authority = &value[..end];
    let host = match authority.rfind(':') {
        Some(idx) if authority[idx + 1..].chars().all(|c| c.is_ascii_digit() || c == '*') => {
            &authority[..idx]
        }
        _ => authority,
    };
    let host = host.strip_prefix("*.").unwrap_or(host);
    host.trim_end_matches('.').to_ascii_lowercase()
}

fn is_subdomain(child: &str, parent: &str) -> bool {
    child.len() > parent.len()
        && child.ends_with(parent)
        && child.as_bytes()[child.len() - parent.len() - 1] == b'.'
}

/// Strict comparison on hosts: equal, or one a subdomain of the other
pub fn host_matches(required: &str, source: &str) -> bool {
    let required = host_of(required);
    let source = host_of(source);
    if required.is_empty() || source.is_empty() {
        return false;
    }
    required == source || is_subdomain(&required, &source) || is_subdomain(&source, &required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_matches() {
        assert!(matches("example.com", "https://cdn.example.com"));
        assert!(!matches("foo.com", "https://bar.com"));
        assert!(matches("https://x.com", "x.com"));
    }

    #[test]
    fn test_substring_is_symmetric() {
        assert!(matches("cdn.example.com", "example.com"));
        assert!(matches("http://cdn.example.com", "https://example.com"));
    }

    #[test]
    fn test_substring_false_positive_is_preserved() {
        assert!(matches("example.com", "https://evil-example.com"));
    }

    #[test]
    fn test_substring_strips_literal_prefixes_only() {
        // 'self' is not stripped of anything and shares no substring with a host
        assert!(!matches("example.com", "'self'"));
        // a non-http scheme stays part of the string
        assert!(matches("example.com", "wss://example.com"));
        assert!(!matches("wss://example.com", "https://example.com/path"));
    }

    #[test]
    fn test_host_mode_rejects_lookalike_domains() {
        assert!(!host_matches("example.com", "https://evil-example.com"));
        assert!(!host_matches("example.com", "example.com.evil.net"));
    }

    #[test]
    fn test_host_mode_subdomains() {
        assert!(host_matches("example.com", "https://cdn.example.com"));
        assert!(host_matches("cdn.example.com", "*.example.com"));
        assert!(host_matches("https://x.com", "x.com"));
        assert!(host_matches("api.example.com", "https://API.example.com:443/v1/"));
    }

    #[test]
    fn test_host_mode_keywords_never_match() {
        assert!(!host_matches("example.com", "'self'"));
        assert!(!host_matches("example.com", "'none'"));
        assert!(!host_matches("", "example.com"));
    }

    #[test]
    fn test_mode_dispatch() {
        assert!(MatchMode::Substring.matches("example.com", "evil-example.com"));
        assert!(!MatchMode::Host.matches("example.com", "evil-example.com"));
        assert_eq!(MatchMode::default(), MatchMode::Substring);
    }
}
