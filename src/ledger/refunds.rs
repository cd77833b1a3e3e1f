use rust_decimal::Decimal;

use crate::domain::transaction::{Transaction, TransactionType};

pub fn refunded_total(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|tx| tx.transaction_type == TransactionType::Refund)
        .map(|tx| tx.amount)
        .sum()
}

pub fn remaining_refundable(charged: Decimal, transactions: &[Transaction]) -> Decimal {
    charged - refunded_total(transactions)
}
