use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::gateway::{ChargeRequest, ChargeResult, GatewayOutcome, PaymentGateway};

pub struct SimulatedGateway {
    approval_rate: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedGateway {
    pub fn new(approval_rate: f64) -> Self {
        Self {
            approval_rate: approval_rate.clamp(0.0, 1.0),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(approval_rate: f64, seed: u64) -> Self {
        Self {
            approval_rate: approval_rate.clamp(0.0, 1.0),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

#[async_trait::async_trait]
impl PaymentGateway for SimulatedGateway {
    fn name(&self) -> &'static str {
        "simulator"
    }

    async fn charge(&self, request: ChargeRequest) -> Result<ChargeResult> {
        let draw: f64 = self.rng.lock().await.gen();
        let outcome = if draw < self.approval_rate {
            GatewayOutcome::Approved
        } else {
            GatewayOutcome::Declined
        };
        let transaction_id = format!("gw_{}", Uuid::new_v4().simple());
        tracing::debug!(
            payment_id = %request.payment_id,
            outcome = outcome.as_str(),
            %transaction_id,
            "simulated gateway charge"
        );
        Ok(ChargeResult {
            transaction_id,
            outcome,
        })
    }
}
