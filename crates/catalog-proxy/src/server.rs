//! The `POST /api/scan-gtin` endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::client::ScanClient;
use crate::config::ProxyConfig;
use crate::error::{ProxyError, Result};

/// Route served by [`router`].
pub const SCAN_PATH: &str = "/api/scan-gtin";

#[derive(Debug, Deserialize)]
struct ScanRequest {
    #[serde(default)]
    gtin: Option<String>,
}

pub fn router(client: ScanClient) -> Router {
    Router::new()
        .route(SCAN_PATH, post(scan_gtin))
        .with_state(Arc::new(client))
}

async fn scan_gtin(State(client): State<Arc<ScanClient>>, body: Bytes) -> Response {
    let Some(gtin) = requested_gtin(&body) else {
        warn!("scan request without GTIN");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "GTIN is required" })),
        )
            .into_response();
    };

    match client.scan(&gtin).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(err) => {
            warn!(gtin = %gtin, error = %err, "GTIN scan failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to scan GTIN", "details": err.to_string() })),
            )
                .into_response()
        }
    }
}

/// GTIN from a request body, or `None` when the body is not a JSON object
/// with a non-empty `gtin` string.
fn requested_gtin(body: &[u8]) -> Option<String> {
    let request: ScanRequest = serde_json::from_slice(body).ok()?;
    request
        .gtin
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
}

/// Bind `config.bind` and serve until Ctrl-C.
pub async fn serve(config: &ProxyConfig) -> Result<()> {
    let client = ScanClient::new(config)?;
    let listener = TcpListener::bind(&config.bind)
        .await
        .map_err(|source| ProxyError::Bind {
            addr: config.bind.clone(),
            source,
        })?;
    let addr = listener.local_addr()?;
    info!(%addr, path = SCAN_PATH, "scan proxy listening");

    axum::serve(listener, router(client))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("scan proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
