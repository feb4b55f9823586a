use crate::http::handlers::{callbacks, payments};
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(payments::health))
        .route("/ops/liveness", get(payments::liveness))
        .route("/drivers", get(payments::list_drivers))
        .route("/payments/:driver", post(payments::create_payment))
        .route(
            "/payments/:driver/:order_id/status",
            post(payments::payment_status),
        )
        .route(
            "/callbacks/:driver",
            post(callbacks::callback_json).get(callbacks::callback_query),
        )
        .with_state(state)
}
