pub mod config;
pub mod domain {
    pub mod payment;
}
pub mod error;
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod callbacks;
        pub mod payments;
    }
    pub mod routes;
}

#[derive(Clone)]
pub struct AppState {
    pub registry: gateways::registry::GatewayRegistry,
}
