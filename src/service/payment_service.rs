use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::payment::{CreatePaymentRequest, Payment, PaymentStatus};
use crate::domain::transaction::{Refund, RefundRequest, Transaction};
use crate::error::PaymentError;
use crate::gateway::{ChargeRequest, PaymentGateway};
use crate::ledger::refunds::remaining_refundable;
use crate::ledger::store::LedgerStore;
use crate::ledger::{ListQuery, PaymentPage};
use crate::lifecycle;
use crate::validation;

#[derive(Clone)]
pub struct PaymentService {
    pub ledger: LedgerStore,
    pub gateway: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub async fn create(&self, request: CreatePaymentRequest) -> Result<Payment, PaymentError> {
        let input = validation::validate_create(&request)?;

        let now = Utc::now();
        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            merchant_id: input.merchant_id,
            customer_id: input.customer_id,
            amount: input.amount,
            currency: input.currency,
            payment_method: input.payment_method,
            description: input.description,
            card_last_four: input.card_last_four,
            card_type: input.card_type,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
            processed_at: None,
        };
        self.ledger.insert(payment.clone()).await;

        tracing::info!(
            payment_id = %payment.id,
            merchant_id = %payment.merchant_id,
            amount = %payment.amount,
            currency = payment.currency.as_str(),
            "payment created"
        );
        Ok(payment)
    }

    pub async fn get(&self, payment_id: &str) -> Result<Payment, PaymentError> {
        self.ledger
            .get(payment_id)
            .await
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))
    }

    pub async fn list(&self, query: ListQuery) -> PaymentPage {
        self.ledger.list(&query).await
    }

    pub async fn transactions(&self, payment_id: &str) -> Result<Vec<Transaction>, PaymentError> {
        self.ledger
            .transactions(payment_id)
            .await
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))
    }

    // Holds the per-payment lock across the gateway call so a pending
    // payment is charged at most once.
    pub async fn process(&self, payment_id: &str) -> Result<Payment, PaymentError> {
        let _guard = self
            .ledger
            .lock_payment(payment_id)
            .await
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))?;

        let mut payment = self
            .ledger
            .get(payment_id)
            .await
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))?;
        lifecycle::ensure_processable(&payment)?;

        let charge = self
            .gateway
            .charge(ChargeRequest {
                payment_id: payment.id.clone(),
                merchant_id: payment.merchant_id.clone(),
                amount: payment.amount,
                currency: payment.currency,
                payment_method: payment.payment_method,
            })
            .await
            .map_err(|e| PaymentError::Internal(e.to_string()))?;

        let now = Utc::now();
        let entry = Transaction::charge(
            &payment.id,
            payment.amount,
            charge.transaction_id,
            charge.outcome.as_str(),
            now,
        );
        lifecycle::settle_charge(&mut payment, charge.outcome, now);
        self.ledger.record_outcome(payment.clone(), entry).await;

        tracing::info!(
            payment_id = %payment.id,
            outcome = charge.outcome.as_str(),
            status = payment.status.as_str(),
            "payment processed"
        );
        Ok(payment)
    }

    pub async fn refund(
        &self,
        payment_id: &str,
        request: RefundRequest,
    ) -> Result<(Payment, Refund), PaymentError> {
        let _guard = self
            .ledger
            .lock_payment(payment_id)
            .await
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))?;

        let mut payment = self
            .ledger
            .get(payment_id)
            .await
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))?;
        lifecycle::ensure_refundable(&payment)?;

        let (amount, reason) = validation::validate_refund(&request, payment.currency)?;

        let transactions = self.ledger.transactions(payment_id).await.unwrap_or_default();
        let remaining = remaining_refundable(payment.amount, &transactions);
        if amount > remaining {
            return Err(PaymentError::validation(format!(
                "Refund amount {amount} exceeds available amount {remaining}"
            )));
        }

        let now = Utc::now();
        let entry = Transaction::refund(&payment.id, amount, reason.clone(), now);
        let refund = Refund {
            id: entry.id,
            payment_id: payment.id.clone(),
            amount,
            reason,
            created_at: now,
        };
        lifecycle::settle_refund(&mut payment, remaining - amount, now);
        self.ledger.record_outcome(payment.clone(), entry).await;

        tracing::info!(
            payment_id = %payment.id,
            amount = %amount,
            remaining = %(remaining - amount),
            status = payment.status.as_str(),
            "refund recorded"
        );
        Ok((payment, refund))
    }
}
