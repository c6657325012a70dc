// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::time::Duration;

use cspcheck::{Checker, CheckerConfig, Error, HttpClient, HttpClientConfig, RequiredDomains, Status};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn required(entries: &[(&str, &[&str])]) -> RequiredDomains {
    entries
        .iter()
        .map(|(d, domains)| (d.to_string(), domains.iter().map(|s| s.to_string()).collect()))
        .collect()
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn results_only_contain_urls_with_a_policy() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/with-csp",
        ResponseTemplate::new(200).insert_header(
            "content-security-policy",
            "default-src 'self'; script-src 'self' https://cdn.example.com; img-src https://a.com",
        ),
    )
    .await;
    mount(&server, "/without-csp", ResponseTemplate::new(200)).await;

    let urls = vec![
        format!("{}/with-csp", server.uri()),
        format!("{}/without-csp", server.uri()),
    ];
    let required = required(&[
        ("script-src", &["cdn.example.com"]),
        ("img-src", &["a.com", "b.com"]),
        ("style-src", &["fonts.example.com"]),
    ]);

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("results.json");
    let config = CheckerConfig::new().output(&output);

    let checker = Checker::new(&config).unwrap();
    let results = checker.run(&urls, &required, &mut std::io::sink()).await.unwrap();
    results.save(&config.output).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let entries = written.as_object().unwrap();
    assert_eq!(entries.len(), 1);

    let report = &entries[&urls[0]];
    assert_eq!(report["script-src"], serde_json::json!({"status": "passed", "missing": []}));
    assert_eq!(report["img-src"], serde_json::json!({"status": "missing", "missing": ["b.com"]}));
    assert_eq!(
        report["style-src"],
        serde_json::json!({"status": "absent", "missing": ["fonts.example.com"]})
    );
    assert_eq!(results.skipped(), &[urls[1].clone()]);
}

#[tokio::test]
async fn non_200_responses_are_skipped() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/missing",
        ResponseTemplate::new(404).insert_header("content-security-policy", "script-src a.com"),
    )
    .await;
    mount(
        &server,
        "/no-content",
        ResponseTemplate::new(204).insert_header("content-security-policy", "script-src a.com"),
    )
    .await;

    let client = HttpClient::new().unwrap();
    let err = client
        .fetch_policy(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));

    let err = client
        .fetch_policy(&format!("{}/no-content", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 204, .. }));

    let checker = Checker::new(&CheckerConfig::default()).unwrap();
    let urls = vec![format!("{}/missing", server.uri())];
    let results = checker
        .run(&urls, &required(&[("script-src", &["a.com"])]), &mut std::io::sink())
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn report_only_policy_is_opt_in() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/report-only",
        ResponseTemplate::new(200).insert_header(
            "content-security-policy-report-only",
            "script-src https://cdn.example.com",
        ),
    )
    .await;
    let url = format!("{}/report-only", server.uri());

    let client = HttpClient::new().unwrap();
    assert_eq!(client.fetch_policy(&url).await.unwrap(), None);

    let client = HttpClient::with_config(HttpClientConfig {
        include_report_only: true,
        ..Default::default()
    })
    .unwrap();
    let fetched = client.fetch_policy(&url).await.unwrap().unwrap();
    assert!(fetched.report_only);
    assert_eq!(fetched.header, "script-src https://cdn.example.com");

    let config = CheckerConfig::new().include_report_only(true);
    let report = Checker::new(&config)
        .unwrap()
        .check_url(&url, &required(&[("script-src", &["cdn.example.com"])]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.get("script-src").unwrap().status, Status::Passed);
}

#[tokio::test]
async fn unreachable_host_does_not_stop_the_run() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/ok",
        ResponseTemplate::new(200).insert_header("content-security-policy", "img-src a.com"),
    )
    .await;

    let urls = vec![
        "http://127.0.0.1:1/".to_string(),
        "definitely not a url".to_string(),
        format!("{}/ok", server.uri()),
    ];
    let config = CheckerConfig::new().timeout(Duration::from_secs(2));
    let results = Checker::new(&config)
        .unwrap()
        .run(&urls, &required(&[("img-src", &["a.com"])]), &mut std::io::sink())
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert!(results.get(&urls[2]).unwrap().all_passed());
    assert_eq!(results.skipped().len(), 2);
}

#[tokio::test]
async fn slow_response_times_out_and_is_skipped() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/slow",
        ResponseTemplate::new(200)
            .insert_header("content-security-policy", "img-src a.com")
            .set_delay(Duration::from_secs(3)),
    )
    .await;
    let url = format!("{}/slow", server.uri());

    let client = HttpClient::with_config(HttpClientConfig {
        timeout: Duration::from_millis(300),
        ..Default::default()
    })
    .unwrap();
    let err = client.fetch_policy(&url).await.unwrap_err();
    assert!(err.is_timeout(), "unexpected error: {}", err);
    assert!(err.is_network());

    let config = CheckerConfig::new().timeout(Duration::from_millis(300));
    let results = Checker::new(&config)
        .unwrap()
        .run(&[url.clone()], &required(&[("img-src", &["a.com"])]), &mut std::io::sink())
        .await
        .unwrap();
    assert!(results.is_empty());
    assert_eq!(results.skipped(), &[url]);
}

#[tokio::test]
async fn redirects_are_followed() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", "/new"),
    )
    .await;
    mount(
        &server,
        "/new",
        ResponseTemplate::new(200).insert_header("content-security-policy", "script-src a.com"),
    )
    .await;

    let client = HttpClient::new().unwrap();
    let fetched = client
        .fetch_policy(&format!("{}/old", server.uri()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.header, "script-src a.com");
}
