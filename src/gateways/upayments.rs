use crate::config::MethodConfig;
use crate::domain::payment::PaymentDetails;
use crate::error::Result;
use crate::gateways::base::{bearer_headers, join_url, read_json, BaseMethod, MethodSpec};
use crate::gateways::{NormalizedResponse, PaymentGateway};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde_json::{json, Value};

pub const SPEC: MethodSpec = MethodSpec {
    driver: "upayments",
    live_base_url: "https://uapi.upayments.com/api/v1",
    test_base_url: "https://sandboxapi.upayments.com/api/v1",
    required_keys: &["merchant_id", "username", "password", "api_key"],
};

pub const STATUS_BASE_URL: &str = "https://statusapi.upayments.com";

const CHARGE_PATH: &str = "charge";
const STATUS_PATH: &str = "api/v1/get-payment-status";
const CAPTURED: &str = "CAPTURED";

pub struct UpaymentsGateway {
    base: BaseMethod,
    status_base_url: String,
}

impl UpaymentsGateway {
    pub fn new(config: MethodConfig) -> Result<Self> {
        let headers = bearer_headers(&config.api_key)?;
        let status_base_url = config
            .status_base_url
            .clone()
            .unwrap_or_else(|| STATUS_BASE_URL.to_string());
        crate::config::validate_url("status_base_url", &status_base_url)?;

        Ok(Self {
            base: BaseMethod::with_headers(SPEC, config, headers)?,
            status_base_url,
        })
    }

    pub fn base(&self) -> &BaseMethod {
        &self.base
    }

    pub fn build_pay_request(&self, details: &PaymentDetails) -> Value {
        self.build_pay_request_at(details, Utc::now())
    }

    /// Maps generic details onto the `/charge` body; `now` suffixes the order id.
    pub fn build_pay_request_at(&self, details: &PaymentDetails, now: DateTime<Utc>) -> Value {
        let transaction = &details.transaction;
        let customer = &details.customer;
        let config = &self.base.config;

        // "0" counts as no id, same as an empty one.
        let order_id = if transaction.id.is_empty() || transaction.id == "0" {
            Value::Null
        } else {
            Value::String(format!("{}_{}", transaction.id, now.timestamp()))
        };

        json!({
            "customer": {
                "name": customer.name,
                "email": customer.email,
                "mobile": customer.phone,
            },
            "language": "ar",
            "reference": {
                "id": transaction.id,
            },
            "paymentGateway": {
                "src": transaction.method.as_deref().unwrap_or("cc"),
            },
            "order": {
                "id": order_id,
                "currency": transaction.currency_code,
                "amount": transaction.price.and_then(|p| p.to_f64()),
            },
            "returnUrl": config.success_url,
            "cancelUrl": config.error_url,
            "notificationUrl": config.notify_url,
            "customerExtraData": "User define data",
        })
    }

    fn status_url(&self, track_id: &str) -> String {
        join_url(&self.status_base_url, &format!("{STATUS_PATH}/{track_id}"))
    }
}

/// `/charge` outcome: success needs HTTP 200 and `status == "success"`.
pub fn normalize_charge(base: &BaseMethod, http_status: u16, body: Value) -> NormalizedResponse {
    let success = http_status == 200 && body.get("status").and_then(Value::as_str) == Some("success");
    let message = str_field(&body, "message");
    let payment_url = body
        .get("data")
        .and_then(|d| d.get("link"))
        .and_then(Value::as_str)
        .map(str::to_string);
    base.response(http_status, success, message, payment_url, body)
}

/// Status lookup outcome; failures carry the provider's `error_msg`.
pub fn normalize_status(base: &BaseMethod, http_status: u16, body: Value) -> NormalizedResponse {
    let success = http_status == 200 && body.get("status").and_then(Value::as_str) == Some("success");
    let message = if success {
        str_field(&body, "status")
    } else {
        str_field(&body, "error_msg")
    };
    let payment_url = str_field(&body, "paymentURL");
    base.response(http_status, success, message, payment_url, body)
}

fn str_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

#[async_trait::async_trait]
impl PaymentGateway for UpaymentsGateway {
    fn driver(&self) -> &'static str {
        SPEC.driver
    }

    async fn pay(&self, details: &PaymentDetails) -> Result<NormalizedResponse> {
        let payload = self.build_pay_request(details);
        tracing::debug!(order = %payload["order"], "upayments charge payload built");

        let resp = self
            .base
            .client
            .post(self.base.url(CHARGE_PATH))
            .json(&payload)
            .send()
            .await?;
        let (status, body) = read_json(resp).await?;
        tracing::info!(driver = SPEC.driver, endpoint = CHARGE_PATH, status, "charge response");

        let normalized = normalize_charge(&self.base, status, body);
        if !normalized.success {
            tracing::warn!(
                status,
                message = normalized.message.as_deref().unwrap_or(""),
                "upayments charge rejected"
            );
        }
        Ok(normalized)
    }

    async fn get_payment_details(
        &self,
        order_id: &str,
        track_id: Option<&str>,
    ) -> Result<NormalizedResponse> {
        let form = [
            ("merchant_id", self.base.config.merchant_id.as_str()),
            ("order_id", order_id),
        ];
        let resp = self
            .base
            .client
            .post(self.status_url(track_id.unwrap_or_default()))
            .form(&form)
            .send()
            .await?;
        let (status, body) = read_json(resp).await?;
        tracing::info!(driver = SPEC.driver, endpoint = STATUS_PATH, status, order_id, "status response");

        Ok(normalize_status(&self.base, status, body))
    }

    // Upayments callbacks carry no signature to check against.
    fn validate_response_callback(&self, _payload: &Value) -> bool {
        true
    }

    fn response_callback(&self, payload: Value) -> NormalizedResponse {
        if !self.validate_response_callback(&payload) {
            return self
                .base
                .response(400, false, Some("Payment Failed".to_string()), None, payload);
        }

        let result = str_field(&payload, "result");
        let success = result.as_deref() == Some(CAPTURED);
        let status = if success { 200 } else { 400 };
        if !success {
            tracing::warn!(result = result.as_deref().unwrap_or(""), "upayments callback not captured");
        }
        self.base.response(status, success, result, None, payload)
    }
}
