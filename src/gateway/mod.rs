use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::payment::{Currency, PaymentMethod};

pub mod simulator;

#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub payment_id: String,
    pub merchant_id: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayOutcome {
    Approved,
    Declined,
}

impl GatewayOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayOutcome::Approved => "APPROVED",
            GatewayOutcome::Declined => "DECLINED",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, GatewayOutcome::Approved)
    }
}

#[derive(Debug, Clone)]
pub struct ChargeResult {
    pub transaction_id: String,
    pub outcome: GatewayOutcome,
}

#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn charge(&self, request: ChargeRequest) -> Result<ChargeResult>;
}
