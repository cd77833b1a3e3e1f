use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let ledger_ok = state.payment_service.ledger.ping().await;
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "payment-api",
            "database": if ledger_ok { "connected" } else { "error" },
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
        .into_response()
}
