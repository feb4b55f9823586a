use payment_methods::config::AppConfig;
use payment_methods::gateways::mock::MockGateway;
use payment_methods::gateways::registry::GatewayRegistry;
use payment_methods::gateways::upayments::UpaymentsGateway;
use payment_methods::http::routes::router;
use payment_methods::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let mut registry = GatewayRegistry::new();
    match UpaymentsGateway::new(cfg.upayments.clone()) {
        Ok(upayments) => registry = registry.register(Arc::new(upayments)),
        Err(e) => tracing::warn!("upayments driver disabled: {}", e),
    }
    if let Ok(behavior) = std::env::var("MOCK_GATEWAY_BEHAVIOR") {
        registry = registry.register(Arc::new(MockGateway { behavior }));
    }
    if registry.drivers().is_empty() {
        anyhow::bail!("no payment driver configured");
    }

    let app = router(AppState { registry });

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
