use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::payment::{Payment, PaymentStatus};
use crate::error::PaymentError;
use crate::gateway::GatewayOutcome;

pub fn ensure_processable(payment: &Payment) -> Result<(), PaymentError> {
    match payment.status {
        PaymentStatus::Pending => Ok(()),
        _ => Err(PaymentError::InvalidState(format!(
            "Payment {} is not in pending status",
            payment.id
        ))),
    }
}

pub fn ensure_refundable(payment: &Payment) -> Result<(), PaymentError> {
    match payment.status {
        PaymentStatus::Completed | PaymentStatus::PartialRefunded => Ok(()),
        _ => Err(PaymentError::InvalidState(format!(
            "Payment is not completed: status is {}",
            payment.status.as_str()
        ))),
    }
}

pub fn settle_charge(payment: &mut Payment, outcome: GatewayOutcome, now: DateTime<Utc>) {
    if outcome.is_approved() {
        payment.status = PaymentStatus::Completed;
        payment.processed_at = Some(now);
    } else {
        payment.status = PaymentStatus::Failed;
    }
    payment.updated_at = now;
}

pub fn settle_refund(payment: &mut Payment, remaining: Decimal, now: DateTime<Utc>) {
    payment.status = if remaining.is_zero() {
        PaymentStatus::Refunded
    } else {
        PaymentStatus::PartialRefunded
    };
    payment.updated_at = now;
}
