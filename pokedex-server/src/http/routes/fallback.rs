//! Catch-all for unknown routes

use axum::http::{StatusCode, Uri};
use axum::Json;
use serde_json::{json, Value};

pub const IMPROPER_ROUTE_MSG: &str = "Improper route. Check API docs plz.";

/// Any path no other route matched
pub async fn improper_route(uri: Uri) -> (StatusCode, Json<Value>) {
    tracing::debug!(%uri, "No route matched");
    (StatusCode::NOT_FOUND, Json(json!({ "msg": IMPROPER_ROUTE_MSG })))
}
