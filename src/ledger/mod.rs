use crate::domain::payment::Payment;

pub mod refunds;
pub mod store;

pub const DEFAULT_PAGE_LIMIT: usize = 20;
pub const MAX_PAGE_LIMIT: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub merchant_id: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct PaymentPage {
    pub payments: Vec<Payment>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}
