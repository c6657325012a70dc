// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cspcheck::{CspPolicy, DuplicatePolicy, MatchMode, RequiredDomains, Validator};

const POLICY: &str = "default-src 'self'; \
    script-src 'self' 'nonce-abc123' https://cdn.example.com https://www.googletagmanager.com; \
    style-src 'self' 'unsafe-inline' https://fonts.googleapis.com; \
    img-src 'self' data: https://*.example.com https://images.example.net; \
    connect-src 'self' https://api.example.com wss://live.example.com; \
    font-src https://fonts.gstatic.com; \
    frame-ancestors 'none'; base-uri 'self'; form-action 'self'";

fn required() -> RequiredDomains {
    [
        ("script-src", vec!["cdn.example.com", "www.googletagmanager.com"]),
        ("img-src", vec!["images.example.net", "static.example.org"]),
        ("connect-src", vec!["api.example.com"]),
        ("media-src", vec!["media.example.com"]),
    ]
    .into_iter()
    .map(|(d, domains)| (d.to_string(), domains.into_iter().map(String::from).collect()))
    .collect()
}

fn parse_benchmark(c: &mut Criterion) {
    c.bench_function("parse_policy", |b| {
        b.iter(|| CspPolicy::parse(black_box(POLICY)))
    });

    c.bench_function("parse_policy_merge", |b| {
        b.iter(|| CspPolicy::parse_with(black_box(POLICY), DuplicatePolicy::Merge))
    });
}

fn validate_benchmark(c: &mut Criterion) {
    let policy = CspPolicy::parse(POLICY);
    let required = required();

    c.bench_function("validate_substring", |b| {
        let validator = Validator::new(MatchMode::Substring);
        b.iter(|| validator.validate(black_box(&policy), black_box(&required)))
    });

    c.bench_function("validate_host", |b| {
        let validator = Validator::new(MatchMode::Host);
        b.iter(|| validator.validate(black_box(&policy), black_box(&required)))
    });
}

criterion_group!(benches, parse_benchmark, validate_benchmark);
criterion_main!(benches);
