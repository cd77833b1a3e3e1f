pub mod config;
pub mod domain {
    pub mod payment;
    pub mod transaction;
}
pub mod error;
pub mod gateway;
pub mod http {
    pub mod handlers {
        pub mod health;
        pub mod payments;
        pub mod refunds;
    }
    pub mod router;
}
pub mod ledger;
pub mod lifecycle;
pub mod service {
    pub mod payment_service;
}
pub mod validation;

#[derive(Clone)]
pub struct AppState {
    pub payment_service: service::payment_service::PaymentService,
}
