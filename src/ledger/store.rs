use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::domain::payment::Payment;
use crate::domain::transaction::Transaction;
use crate::ledger::{ListQuery, PaymentPage, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

#[derive(Debug)]
struct PaymentRecord {
    payment: Payment,
    transactions: Vec<Transaction>,
}

#[derive(Debug, Default)]
struct LedgerState {
    records: HashMap<String, PaymentRecord>,
    // insertion order of payment ids, for stable listing
    order: Vec<String>,
}

#[derive(Clone, Default)]
pub struct LedgerStore {
    state: Arc<RwLock<LedgerState>>,
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, payment: Payment) {
        let id = payment.id.clone();
        {
            let mut state = self.state.write().await;
            state.order.push(id.clone());
            state.records.insert(
                id.clone(),
                PaymentRecord {
                    payment,
                    transactions: Vec::new(),
                },
            );
        }
        self.locks
            .lock()
            .await
            .insert(id, Arc::new(Mutex::new(())));
    }

    pub async fn get(&self, id: &str) -> Option<Payment> {
        self.state.read().await.records.get(id).map(|r| r.payment.clone())
    }

    pub async fn transactions(&self, id: &str) -> Option<Vec<Transaction>> {
        self.state
            .read()
            .await
            .records
            .get(id)
            .map(|r| r.transactions.clone())
    }

    // Serializes process/refund per payment id without blocking the rest
    // of the ledger. None means the id was never created.
    pub async fn lock_payment(&self, id: &str) -> Option<OwnedMutexGuard<()>> {
        let entry = self.locks.lock().await.get(id).cloned()?;
        Some(entry.lock_owned().await)
    }

    // Writes the updated payment and its new ledger entry under a single
    // write lock so readers never see one without the other.
    pub async fn record_outcome(&self, payment: Payment, entry: Transaction) {
        let mut state = self.state.write().await;
        if let Some(record) = state.records.get_mut(&payment.id) {
            record.payment = payment;
            record.transactions.push(entry);
        }
    }

    pub async fn list(&self, query: &ListQuery) -> PaymentPage {
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT);
        let offset = query.offset.unwrap_or(0);

        let state = self.state.read().await;
        let filtered: Vec<&Payment> = state
            .order
            .iter()
            .filter_map(|id| state.records.get(id).map(|r| &r.payment))
            .filter(|p| {
                query
                    .merchant_id
                    .as_deref()
                    .map_or(true, |m| p.merchant_id == m)
            })
            .collect();

        let total = filtered.len();
        let payments = filtered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        PaymentPage {
            payments,
            total,
            offset,
            limit,
        }
    }

    pub async fn ping(&self) -> bool {
        let _ = self.state.read().await;
        true
    }
}
