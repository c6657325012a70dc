// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for cspcheck
//!
//! Fetches response heads and extracts the policy headers.

mod client;
mod response;
mod source;

pub use client::{HttpClient, HttpClientConfig};
pub use response::Response;
pub use source::{FetchedPolicy, PolicySource, StaticSource};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("cspcheck/", env!("CARGO_PKG_VERSION"));
