use axum::routing::get;
use axum::{Json, Router};

pub fn router() -> Router {
    Router::new().route("/", get(health))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true, "status": "ok" }))
}
