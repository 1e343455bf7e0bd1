use amedas_snapshot::client::{AmedasClient, ClientError, ErrorKind};
use amedas_snapshot::key::LookupKey;
use reqwest::{Client, StatusCode, Url};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, AmedasClient) {
    let server = MockServer::start().await;
    let http = Client::builder().timeout(Duration::from_secs(10)).build().unwrap();
    let base = Url::parse(&format!("{}/bosai/amedas/data/", server.uri())).unwrap();
    (server, AmedasClient::new(http, base))
}

async fn mount_latest_time(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/bosai/amedas/data/latest_time.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_latest_key() {
    let (server, client) = setup().await;
    mount_latest_time(&server, "2026-02-19T17:30:00+09:00\n").await;

    let key = client.latest_key().await.unwrap();
    assert_eq!("20260219173000", key.as_str());
}

#[tokio::test]
async fn test_latest_key_accept_header() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/bosai/amedas/data/latest_time.txt"))
        .and(header("accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("2026-02-19T17:30:00+09:00"))
        .expect(1)
        .mount(&server)
        .await;

    client.latest_key().await.unwrap();
}

#[tokio::test]
async fn test_latest_key_bad_format() {
    let (server, client) = setup().await;
    mount_latest_time(&server, "2026-02-19T17:30+09:00").await;

    match client.latest_key().await {
        Err(ClientError::Format(raw)) => assert_eq!("2026-02-19T17:30+09:00", raw),
        other => panic!("unexpected result {:?}", other),
    }
}

#[tokio::test]
async fn test_latest_key_unavailable() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/bosai/amedas/data/latest_time.txt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    match client.latest_key().await {
        Err(ClientError::Unavailable(status, url)) => {
            assert_eq!(StatusCode::SERVICE_UNAVAILABLE, status);
            assert!(url.as_str().ends_with("/latest_time.txt"));
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[tokio::test]
async fn test_snapshot() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/bosai/amedas/data/map/20260219173000.json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "44132": {"temp": [5.2, 0]},
            "44136": {"temp": [4.8, 0]},
        })))
        .mount(&server)
        .await;

    let key: LookupKey = "2026-02-19T17:30:00+09:00".parse().unwrap();
    let snapshot = client.snapshot(&key, "44132").await.unwrap();

    assert_eq!("44132", snapshot.station_code);
    assert_eq!(json!({"temp": [5.2, 0]}), snapshot.data);
    assert_eq!(
        format!("{}/bosai/amedas/data/latest_time.txt", server.uri()),
        snapshot.source.latest_time_url
    );
    assert_eq!(
        format!("{}/bosai/amedas/data/map/20260219173000.json", server.uri()),
        snapshot.source.map_url
    );
    assert!(snapshot.source.fetched_at.ends_with("+09:00"));
}

#[tokio::test]
async fn test_snapshot_station_missing() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/bosai/amedas/data/map/20260219173000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"44136": {"temp": [4.8, 0]}})))
        .mount(&server)
        .await;

    let key: LookupKey = "2026-02-19T17:30:00+09:00".parse().unwrap();
    let err = client.snapshot(&key, "44132").await.unwrap_err();
    assert_eq!(ErrorKind::NotFound, err.kind());
}

#[tokio::test]
async fn test_snapshot_unavailable() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/bosai/amedas/data/map/20260219173000.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let key: LookupKey = "2026-02-19T17:30:00+09:00".parse().unwrap();
    let err = client.snapshot(&key, "44132").await.unwrap_err();
    assert_eq!(ErrorKind::Unavailable, err.kind());
}

#[tokio::test]
async fn test_snapshot_undecodable_body() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/bosai/amedas/data/map/20260219173000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let key: LookupKey = "2026-02-19T17:30:00+09:00".parse().unwrap();
    let err = client.snapshot(&key, "44132").await.unwrap_err();
    assert_eq!(ErrorKind::Unavailable, err.kind());
}

#[tokio::test]
async fn test_server_gone() {
    let server = MockServer::start().await;
    let base = Url::parse(&format!("{}/bosai/amedas/data/", server.uri())).unwrap();
    drop(server);

    let client = AmedasClient::new(Client::new(), base);
    let err = client.latest_key().await.unwrap_err();
    assert_eq!(ErrorKind::Unavailable, err.kind());
}

async fn mount_map(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/bosai/amedas/data/map/20260219173000.json"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_latest_document() {
    let (server, client) = setup().await;
    mount_latest_time(&server, "2026-02-19T17:30:00+09:00").await;
    mount_map(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"44132": {"temp": [5.2, 0]}})),
    )
    .await;

    let buf = client.latest_document("44132").await.unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(json!("44132"), doc["station_code"]);
    assert_eq!(json!({"temp": [5.2, 0]}), doc["data"]);
    assert!(buf.ends_with(b"}\n"));
}

#[tokio::test]
async fn test_latest_document_pointer_unavailable() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/bosai/amedas/data/latest_time.txt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bosai/amedas/data/map/20260219173000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"44132": {"temp": [5.2, 0]}})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.latest_document("44132").await.unwrap_err();
    assert_eq!(ErrorKind::Unavailable, err.kind());
}

#[tokio::test]
async fn test_latest_document_snapshot_unavailable() {
    let (server, client) = setup().await;
    mount_latest_time(&server, "2026-02-19T17:30:00+09:00").await;
    mount_map(&server, ResponseTemplate::new(503)).await;

    let err = client.latest_document("44132").await.unwrap_err();
    assert_eq!(ErrorKind::Unavailable, err.kind());
}

#[tokio::test]
async fn test_latest_document_station_missing() {
    let (server, client) = setup().await;
    mount_latest_time(&server, "2026-02-19T17:30:00+09:00").await;
    mount_map(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"44136": {"temp": [4.8, 0]}})),
    )
    .await;

    let err = client.latest_document("44132").await.unwrap_err();
    assert_eq!(ErrorKind::NotFound, err.kind());
}
