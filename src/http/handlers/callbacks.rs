use crate::http::handlers::payments::{error_response, normalized, rejection_response};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use std::collections::HashMap;

pub async fn callback_json(
    State(state): State<AppState>,
    Path(driver): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(payload)) => handle(&state, &driver, payload),
        Err(rejection) => rejection_response(rejection),
    }
}

/// Browser redirects deliver the callback as query parameters.
pub async fn callback_query(
    State(state): State<AppState>,
    Path(driver): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let payload = serde_json::Value::Object(
        params
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect(),
    );
    handle(&state, &driver, payload)
}

fn handle(state: &AppState, driver: &str, payload: serde_json::Value) -> Response {
    let gateway = match state.registry.get(driver) {
        Ok(g) => g,
        Err(e) => return error_response(e),
    };
    let resp = gateway.response_callback(payload);
    tracing::info!(driver, success = resp.success, status = resp.http_status, "payment callback");
    normalized(resp)
}
