// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for cspcheck
//!
//! Input errors always carry the offending file path, fetch errors the URL,
//! so the operator can tell which of many inputs went wrong.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for cspcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cspcheck
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Server answered with something other than 200 OK
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// Input file does not exist
    #[error("File '{}' not found", path.display())]
    InputNotFound { path: PathBuf },

    /// Input file is not valid JSON
    #[error("File '{}' is not valid JSON: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Input file is valid JSON but has the wrong shape
    #[error("File '{}' has unexpected contents: {reason}", path.display())]
    InvalidInput { path: PathBuf, reason: String },

    /// Writing an output file failed
    #[error("Failed to write '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an invalid URL error
    pub fn url(url: impl Into<String>, source: url::ParseError) -> Self {
        Error::Url {
            url: url.into(),
            source,
        }
    }

    /// Create an unexpected status error
    pub fn unexpected_status(url: impl Into<String>, status: u16) -> Self {
        Error::UnexpectedStatus {
            url: url.into(),
            status,
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create an output error
    pub fn output(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Output {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this error came from reading an input file
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Error::InputNotFound { .. } | Error::InvalidJson { .. } | Error::InvalidInput { .. }
        )
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Check if the request timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url_str(&self) -> Option<&str> {
        match self {
            Error::Url { url, .. } => Some(url),
            Error::UnexpectedStatus { url, .. } => Some(url),
            Error::Http(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }

    /// Get the input or output file path if available
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::InputNotFound { path }
            | Error::InvalidJson { path, .. }
            | Error::InvalidInput { path, .. }
            | Error::Output { path, .. } => Some(path.as_path()),
            _ => None,
        }
    }
}
