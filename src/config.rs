use crate::error::{GatewayError, Result};

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub upayments: MethodConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            upayments: MethodConfig::from_env("UPAYMENTS"),
        }
    }
}

/// Merchant credentials and redirect targets for one payment method.
#[derive(Clone, Default)]
pub struct MethodConfig {
    pub merchant_id: String,
    pub username: String,
    pub password: String,
    pub api_key: String,
    pub success_url: String,
    pub error_url: String,
    pub notify_url: String,
    pub sandbox: bool,
    pub timeout_ms: u64,
    /// Overrides the driver's live/test base url.
    pub base_url: Option<String>,
    /// Overrides the host used for payment status lookups.
    pub status_base_url: Option<String>,
}

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

impl std::fmt::Debug for MethodConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodConfig")
            .field("merchant_id", &self.merchant_id)
            .field("username", &self.username)
            .field("password", &"***")
            .field("api_key", &"***")
            .field("success_url", &self.success_url)
            .field("error_url", &self.error_url)
            .field("notify_url", &self.notify_url)
            .field("sandbox", &self.sandbox)
            .field("timeout_ms", &self.timeout_ms)
            .field("base_url", &self.base_url)
            .field("status_base_url", &self.status_base_url)
            .finish()
    }
}

impl MethodConfig {
    /// Reads `{PREFIX}_MERCHANT_ID`, `{PREFIX}_API_KEY` and friends.
    pub fn from_env(prefix: &str) -> Self {
        let var = |name: &str| std::env::var(format!("{prefix}_{name}")).ok();
        Self {
            merchant_id: var("MERCHANT_ID").unwrap_or_default(),
            username: var("USERNAME").unwrap_or_default(),
            password: var("PASSWORD").unwrap_or_default(),
            api_key: var("API_KEY").unwrap_or_default(),
            success_url: var("SUCCESS_URL").unwrap_or_default(),
            error_url: var("ERROR_URL").unwrap_or_default(),
            notify_url: var("NOTIFY_URL").unwrap_or_default(),
            sandbox: var("SANDBOX")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            timeout_ms: var("TIMEOUT_MS")
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_TIMEOUT_MS),
            base_url: var("BASE_URL").filter(|s| !s.is_empty()),
            status_base_url: var("STATUS_BASE_URL").filter(|s| !s.is_empty()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "merchant_id" => &self.merchant_id,
            "username" => &self.username,
            "password" => &self.password,
            "api_key" => &self.api_key,
            "success_url" => &self.success_url,
            "error_url" => &self.error_url,
            "notify_url" => &self.notify_url,
            _ => return None,
        };
        Some(value.as_str()).filter(|v| !v.is_empty())
    }

    /// Fails on the first required key that is missing or empty.
    pub fn require(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            if self.get(key).is_none() {
                return Err(GatewayError::MissingConfig((*key).to_string()));
            }
        }
        Ok(())
    }
}

/// Parses `raw` as an absolute http(s) url.
pub fn validate_url(name: &str, raw: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| GatewayError::InvalidConfig(format!("{name} '{raw}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(GatewayError::InvalidConfig(format!(
            "{name} must use http or https, got: {}",
            parsed.scheme()
        )));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> MethodConfig {
        MethodConfig {
            merchant_id: "1201".to_string(),
            username: "test".to_string(),
            password: "test".to_string(),
            api_key: "secret".to_string(),
            ..MethodConfig::default()
        }
    }

    #[test]
    fn require_passes_when_all_keys_present() {
        assert!(full().require(&["merchant_id", "username", "password", "api_key"]).is_ok());
    }

    #[test]
    fn require_reports_first_missing_key() {
        let cfg = MethodConfig {
            api_key: String::new(),
            ..full()
        };
        let err = cfg
            .require(&["merchant_id", "api_key", "notify_url"])
            .unwrap_err();
        assert!(matches!(err, GatewayError::MissingConfig(ref k) if k == "api_key"));
    }

    #[test]
    fn unknown_key_counts_as_missing() {
        assert!(full().require(&["colour"]).is_err());
    }

    #[test]
    fn debug_hides_secrets() {
        let rendered = format!("{:?}", full());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("1201"));
    }

    #[test]
    fn validate_url_rejects_other_schemes() {
        assert!(validate_url("base_url", "https://uapi.upayments.com/api/v1").is_ok());
        assert!(validate_url("base_url", "ftp://uapi.upayments.com").is_err());
        assert!(validate_url("base_url", "not a url").is_err());
    }
}
