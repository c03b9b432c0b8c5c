//! Common routes: liveness, health, version.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
}

async fn hello() -> Json<StatusBody> {
    Json(StatusBody { status: "OK" })
}

async fn health() -> Json<StatusBody> {
    Json(StatusBody { status: "ok" })
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Common routes (no state): GET /hello, GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/health", get(health))
        .route("/version", get(version))
}
