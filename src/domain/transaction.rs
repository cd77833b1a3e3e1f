use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Charge,
    Refund,
}

#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: Uuid,
    pub payment_id: String,
    pub transaction_type: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub gateway_transaction_id: Option<String>,
    pub gateway_response: Option<String>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn charge(
        payment_id: &str,
        amount: Decimal,
        gateway_transaction_id: String,
        gateway_response: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payment_id: payment_id.to_string(),
            transaction_type: TransactionType::Charge,
            amount,
            gateway_transaction_id: Some(gateway_transaction_id),
            gateway_response: Some(gateway_response.to_string()),
            reason: None,
            created_at: now,
        }
    }

    pub fn refund(payment_id: &str, amount: Decimal, reason: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            payment_id: payment_id.to_string(),
            transaction_type: TransactionType::Refund,
            amount,
            gateway_transaction_id: None,
            gateway_response: None,
            reason: Some(reason),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Refund {
    pub id: Uuid,
    pub payment_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefundRequest {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub reason: Option<String>,
}
