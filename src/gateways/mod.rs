use crate::domain::payment::PaymentDetails;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub mod base;
pub mod mock;
pub mod registry;
pub mod upayments;

/// Provider-agnostic result returned by every adapter operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResponse {
    pub http_status: u16,
    pub success: bool,
    pub message: Option<String>,
    pub payment_url: Option<String>,
    pub raw: serde_json::Value,
}

/// Contract every payment method implements.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Registry name of this method, e.g. `upayments`.
    fn driver(&self) -> &'static str;

    /// Starts a payment and returns the hosted payment page url on success.
    async fn pay(&self, details: &PaymentDetails) -> Result<NormalizedResponse>;

    /// Looks up the provider-side status of an order.
    async fn get_payment_details(
        &self,
        order_id: &str,
        track_id: Option<&str>,
    ) -> Result<NormalizedResponse>;

    /// Checks that a callback payload really came from the provider.
    fn validate_response_callback(&self, payload: &serde_json::Value) -> bool;

    /// Interprets the payload the provider sends back after payment.
    fn response_callback(&self, payload: serde_json::Value) -> NormalizedResponse;
}
