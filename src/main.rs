use payment_api::config::AppConfig;
use payment_api::gateway::simulator::SimulatedGateway;
use payment_api::ledger::store::LedgerStore;
use payment_api::service::payment_service::PaymentService;
use payment_api::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let gateway = match cfg.gateway_seed {
        Some(seed) => SimulatedGateway::with_seed(cfg.approval_rate, seed),
        None => SimulatedGateway::new(cfg.approval_rate),
    };

    let payment_service = PaymentService {
        ledger: LedgerStore::new(),
        gateway: Arc::new(gateway),
    };

    let state = AppState { payment_service };
    let app = payment_api::http::router::build(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
