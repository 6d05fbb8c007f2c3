//! Echo stub for the search backend.
//!
//! Accepts `{query}` on `POST /api/search` and acknowledges it without running any
//! search, which is enough to exercise the client end to end.

use crate::config::ServerConfig;
use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: missing query")]
    MissingQuery,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingQuery => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(json!({ "success": false, "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Routes of the echo server, without binding a socket
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/test", get(test_handler))
        .route("/api/search", post(search_handler))
        .layer(cors)
}

async fn test_handler() -> impl IntoResponse {
    Json(json!({ "message": "Server is working!" }))
}

async fn search_handler(Json(payload): Json<Value>) -> Result<impl IntoResponse, AppError> {
    let query = match payload.get("query") {
        Some(query) if !query.is_null() => query.clone(),
        _ => {
            warn!("Search payload without query");
            return Err(AppError::MissingQuery);
        }
    };

    info!("Received search query: {}", query);

    Ok(Json(json!({
        "success": true,
        "message": "Search request received",
        "query": query,
    })))
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let address = config.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("🚀 Echo server running on http://{address}");

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
