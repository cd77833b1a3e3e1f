#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub approval_rate: f64,
    pub gateway_seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            approval_rate: std::env::var("GATEWAY_APPROVAL_RATE")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(0.9),
            gateway_seed: std::env::var("GATEWAY_SEED")
                .ok()
                .and_then(|v| v.parse::<u64>().ok()),
        }
    }
}
