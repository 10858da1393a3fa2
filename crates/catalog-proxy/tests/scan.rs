use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::Query;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use serde_json::{Value, json};
use std::collections::HashMap;
use tokio::net::TcpListener;
use tower::ServiceExt;

use catalog_proxy::{ProxyConfig, SCAN_PATH, ScanClient, router};

/// Start a fake product API on an ephemeral port and return its base URL.
async fn fake_upstream() -> String {
    let app = Router::new()
        .route(
            "/lookup",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                axum::Json(json!({
                    "gtin": params.get("gtin"),
                    "key": params.get("api_key"),
                    "title": "Bleistift HB"
                }))
            }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        )
        .route("/html", get(|| async { "<html>not json</html>" }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn proxy(upstream: String) -> Router {
    let client = ScanClient::new(&ProxyConfig {
        upstream_url: upstream,
        api_key: "secret".to_string(),
        ..ProxyConfig::default()
    })
    .unwrap();
    router(client)
}

async fn post(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::post(SCAN_PATH)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn upstream_json_is_returned_verbatim() {
    let base = fake_upstream().await;
    let (status, body) = post(proxy(format!("{base}/lookup")), r#"{"gtin":"4006381333931"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "gtin": "4006381333931", "key": "secret", "title": "Bleistift HB" })
    );
}

#[tokio::test]
async fn missing_gtin_is_a_bad_request() {
    let base = fake_upstream().await;
    for body in ["", "{}", r#"{"gtin":""}"#, "not json"] {
        let (status, payload) = post(proxy(format!("{base}/lookup")), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(payload, json!({ "error": "GTIN is required" }));
    }
}

#[tokio::test]
async fn upstream_failures_become_500() {
    let base = fake_upstream().await;
    for path in ["broken", "html"] {
        let (status, payload) =
            post(proxy(format!("{base}/{path}")), r#"{"gtin":"4006381333931"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload["error"], "Failed to scan GTIN");
        let details = payload["details"].as_str().unwrap();
        assert!(!details.is_empty());
        assert!(!details.contains("secret"), "api key leaked: {details}");
    }
}

#[tokio::test]
async fn unreachable_upstream_becomes_500() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let (status, payload) =
        post(proxy(format!("http://{addr}/lookup")), r#"{"gtin":"1"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let details = payload["details"].as_str().unwrap();
    assert!(details.starts_with("network error"));
    assert!(!details.contains("secret"), "api key leaked: {details}");
    assert!(!details.contains("api_key"), "query leaked: {details}");
}
