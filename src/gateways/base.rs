//! Plumbing shared by every payment method: credential checks, the
//! authenticated HTTP client, live/sandbox url selection and the
//! normalized response builder.

use crate::config::{validate_url, MethodConfig};
use crate::error::{GatewayError, Result};
use crate::gateways::NormalizedResponse;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::time::Duration;

/// Static description of a payment method.
#[derive(Debug, Clone, Copy)]
pub struct MethodSpec {
    pub driver: &'static str,
    pub live_base_url: &'static str,
    pub test_base_url: &'static str,
    pub required_keys: &'static [&'static str],
}

pub struct BaseMethod {
    pub spec: MethodSpec,
    pub config: MethodConfig,
    pub sandbox: bool,
    pub client: reqwest::Client,
    base_url: String,
}

impl BaseMethod {
    pub fn new(spec: MethodSpec, config: MethodConfig) -> Result<Self> {
        Self::with_headers(spec, config, HeaderMap::new())
    }

    /// Builds the client with `headers` attached to every outbound request.
    pub fn with_headers(spec: MethodSpec, config: MethodConfig, headers: HeaderMap) -> Result<Self> {
        config.require(spec.required_keys)?;

        let sandbox = config.sandbox;
        let base_url = match &config.base_url {
            Some(custom) => custom.clone(),
            None if sandbox => spec.test_base_url.to_string(),
            None => spec.live_base_url.to_string(),
        };
        validate_url("base_url", &base_url)?;

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        let client = builder.build()?;

        tracing::debug!(driver = spec.driver, sandbox, %base_url, "payment method initialised");

        Ok(Self {
            spec,
            config,
            sandbox,
            client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the active base url.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    pub fn response(
        &self,
        http_status: u16,
        success: bool,
        message: Option<String>,
        payment_url: Option<String>,
        raw: serde_json::Value,
    ) -> NormalizedResponse {
        NormalizedResponse {
            http_status,
            success,
            message,
            payment_url,
            raw,
        }
    }
}

pub fn bearer_headers(token: &str) -> Result<HeaderMap> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| GatewayError::InvalidConfig(format!("api_key is not a valid header value: {e}")))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Reads the whole body and decodes it as JSON.
pub async fn read_json(response: reqwest::Response) -> Result<(u16, serde_json::Value)> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    let body = serde_json::from_slice(&bytes).map_err(|source| GatewayError::Decode { status, source })?;
    Ok((status, body))
}
