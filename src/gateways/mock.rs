use crate::domain::payment::PaymentDetails;
use crate::error::Result;
use crate::gateways::{NormalizedResponse, PaymentGateway};
use serde_json::json;

/// Offline driver; `behavior` is `ALWAYS_SUCCESS` (default) or `ALWAYS_FAILURE`.
pub struct MockGateway {
    pub behavior: String,
}

impl MockGateway {
    fn fails(&self) -> bool {
        self.behavior == "ALWAYS_FAILURE"
    }
}

#[async_trait::async_trait]
impl PaymentGateway for MockGateway {
    fn driver(&self) -> &'static str {
        "mock"
    }

    async fn pay(&self, details: &PaymentDetails) -> Result<NormalizedResponse> {
        let order_id = details.transaction.id.clone();
        let response = if self.fails() {
            NormalizedResponse {
                http_status: 400,
                success: false,
                message: Some("mock decline".to_string()),
                payment_url: None,
                raw: json!({"status": "error", "order_id": order_id}),
            }
        } else {
            let track_id = format!("mock_{}", uuid::Uuid::new_v4());
            NormalizedResponse {
                http_status: 200,
                success: true,
                message: Some("mock charge created".to_string()),
                payment_url: Some(format!("https://mock.invalid/pay/{track_id}")),
                raw: json!({"status": "success", "order_id": order_id, "track_id": track_id}),
            }
        };
        Ok(response)
    }

    async fn get_payment_details(
        &self,
        order_id: &str,
        track_id: Option<&str>,
    ) -> Result<NormalizedResponse> {
        let success = !self.fails();
        Ok(NormalizedResponse {
            http_status: 200,
            success,
            message: Some(if success { "success" } else { "mock order failed" }.to_string()),
            payment_url: None,
            raw: json!({"order_id": order_id, "track_id": track_id}),
        })
    }

    /// Only JSON objects look like a callback.
    fn validate_response_callback(&self, payload: &serde_json::Value) -> bool {
        payload.is_object()
    }

    fn response_callback(&self, payload: serde_json::Value) -> NormalizedResponse {
        if !self.validate_response_callback(&payload) {
            return NormalizedResponse {
                http_status: 400,
                success: false,
                message: Some("Payment Failed".to_string()),
                payment_url: None,
                raw: payload,
            };
        }

        let success = !self.fails();
        NormalizedResponse {
            http_status: if success { 200 } else { 400 },
            success,
            message: None,
            payment_url: None,
            raw: payload,
        }
    }
}
