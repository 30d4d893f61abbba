//! HTTP server implementation using axum.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::config::ServerConfig;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use thiserror::Error;
use tower_http::services::ServeDir;
use tracing::info;

/// Server error types.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create the axum router.
///
/// `/` serves the generated `index.html`, any other path resolves as a
/// file inside the export directory. No auth, no TLS: downloads only.
pub fn create_router(export_root: &Path) -> Router {
    let files = ServeDir::new(export_root).append_index_html_on_directories(true);
    Router::new()
        .route("/health", get(health))
        .fallback_service(files)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Run the export file server, blocking for the life of the process.
///
/// Bind failure is the one fatal error here; there is no graceful
/// shutdown, the process is terminated by signal.
pub async fn run_server(export_root: PathBuf, config: ServerConfig) -> Result<(), ServerError> {
    let app = create_router(&export_root);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        port = config.port,
        export_root = %export_root.display(),
        "Starting export file server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let export = TempDir::new().unwrap();
        let app = create_router(export.path());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("ok"));
    }

    #[tokio::test]
    async fn test_serves_artifact_bytes() {
        let export = TempDir::new().unwrap();
        std::fs::write(
            export.path().join("BTCUSDT_PERP.A_1min_2024-05_ohlcv.jsonl"),
            "{\"o\":1}\n",
        )
        .unwrap();
        let app = create_router(export.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/BTCUSDT_PERP.A_1min_2024-05_ohlcv.jsonl")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "{\"o\":1}\n");
    }

    #[tokio::test]
    async fn test_root_serves_index_html() {
        let export = TempDir::new().unwrap();
        std::fs::write(
            export.path().join("index.html"),
            "<!doctype html><html><body>exports</body></html>",
        )
        .unwrap();
        let app = create_router(export.path());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("exports"));
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let export = TempDir::new().unwrap();
        let app = create_router(export.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope.jsonl")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
