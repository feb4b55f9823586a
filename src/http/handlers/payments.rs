use crate::domain::payment::{error_envelope, PaymentDetails};
use crate::error::GatewayError;
use crate::gateways::NormalizedResponse;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::Instrument;

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub track_id: Option<String>,
}

pub async fn create_payment(
    State(state): State<AppState>,
    Path(driver): Path<String>,
    body: Result<Json<PaymentDetails>, JsonRejection>,
) -> Response {
    let Json(details) = match body {
        Ok(b) => b,
        Err(rejection) => return rejection_response(rejection),
    };
    let span = tracing::info_span!("pay", request_id = %uuid::Uuid::new_v4(), %driver);
    async move {
        let gateway = match state.registry.get(&driver) {
            Ok(g) => g,
            Err(e) => return error_response(e),
        };
        match gateway.pay(&details).await {
            Ok(resp) => normalized(resp),
            Err(e) => error_response(e),
        }
    }
    .instrument(span)
    .await
}

pub async fn payment_status(
    State(state): State<AppState>,
    Path((driver, order_id)): Path<(String, String)>,
    body: Result<Json<StatusRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rejection) => return rejection_response(rejection),
    };
    let span = tracing::info_span!("payment_status", request_id = %uuid::Uuid::new_v4(), %driver, %order_id);
    async move {
        let gateway = match state.registry.get(&driver) {
            Ok(g) => g,
            Err(e) => return error_response(e),
        };
        match gateway
            .get_payment_details(&order_id, req.track_id.as_deref())
            .await
        {
            Ok(resp) => normalized(resp),
            Err(e) => error_response(e),
        }
    }
    .instrument(span)
    .await
}

pub async fn list_drivers(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.registry.drivers()))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"alive": true}))).into_response()
}

/// Echoes the normalized status code as the HTTP status.
pub(crate) fn normalized(resp: NormalizedResponse) -> Response {
    let status = StatusCode::from_u16(resp.http_status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(resp)).into_response()
}

pub(crate) fn error_response(err: GatewayError) -> Response {
    let status = match &err {
        GatewayError::UnknownDriver(_) => StatusCode::NOT_FOUND,
        GatewayError::Http(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        GatewayError::MissingConfig(_) | GatewayError::InvalidConfig(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::BAD_GATEWAY,
    };
    tracing::warn!(code = err.code(), error = %err, "payment request failed");
    (status, Json(error_envelope(err.code(), err.to_string()))).into_response()
}

/// Malformed or mistyped request bodies, in the same envelope as other errors.
pub(crate) fn rejection_response(rejection: JsonRejection) -> Response {
    let status = rejection.status();
    tracing::warn!(status = status.as_u16(), "request body rejected: {}", rejection.body_text());
    (status, Json(error_envelope("INVALID_REQUEST", rejection.body_text()))).into_response()
}
