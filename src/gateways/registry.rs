use crate::error::{GatewayError, Result};
use crate::gateways::PaymentGateway;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Payment methods keyed by driver name.
#[derive(Clone, Default)]
pub struct GatewayRegistry {
    drivers: BTreeMap<&'static str, Arc<dyn PaymentGateway>>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any method already registered under the same driver name.
    pub fn register(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        let driver = gateway.driver();
        if self.drivers.insert(driver, gateway).is_some() {
            tracing::warn!(driver, "payment driver registered twice, keeping the last one");
        }
        self
    }

    pub fn get(&self, driver: &str) -> Result<Arc<dyn PaymentGateway>> {
        self.drivers
            .get(driver)
            .cloned()
            .ok_or_else(|| GatewayError::UnknownDriver(driver.to_string()))
    }

    pub fn drivers(&self) -> Vec<&'static str> {
        self.drivers.keys().copied().collect()
    }
}
