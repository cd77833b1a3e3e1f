use axum::routing::{get, post};
use axum::Router;

use crate::AppState;

pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(crate::http::handlers::health::health))
        .route(
            "/api/v1/payments",
            get(crate::http::handlers::payments::list_payments)
                .post(crate::http::handlers::payments::create_payment),
        )
        .route(
            "/api/v1/payments/:payment_id",
            get(crate::http::handlers::payments::get_payment),
        )
        .route(
            "/api/v1/payments/:payment_id/process",
            post(crate::http::handlers::payments::process_payment),
        )
        .route(
            "/api/v1/payments/:payment_id/refund",
            post(crate::http::handlers::refunds::create_refund),
        )
        .route(
            "/api/v1/payments/:payment_id/transactions",
            get(crate::http::handlers::payments::list_transactions),
        )
        .with_state(state)
}
