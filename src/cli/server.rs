//! HTTP trigger mode
//!
//! `GET`/`POST /` runs one collection cycle, for schedulers that can only
//! call a URL. Cycles are serialized: a trigger arriving during a run waits
//! for it to finish, so the CSV table is never read and rewritten by two
//! cycles at once.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::collect::CollectionRunner;
use crate::error::{Error, Result, ResultExt};

/// App state shared across handlers
struct AppState {
    runner: CollectionRunner,
    run_lock: Mutex<()>,
}

/// Build the trigger router
pub fn router(runner: CollectionRunner) -> Router {
    let state = AppState {
        runner,
        run_lock: Mutex::new(()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(collect).post(collect))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(runner: CollectionRunner, port: u16) -> Result<()> {
    let app = router(runner);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Run one collection cycle
async fn collect(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let _guard = state.run_lock.lock().await;
    let summary = state.runner.run().await;

    (
        StatusCode::OK,
        format!(
            "Successfully collected data for {} ride options",
            summary.rows_collected
        ),
    )
}
