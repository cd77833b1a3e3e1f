use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::domain::transaction::RefundRequest;
use crate::error::{error_response, rejection_response};
use crate::AppState;

pub async fn create_refund(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
    payload: Result<Json<RefundRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(rejection),
    };

    match state.payment_service.refund(&payment_id, request).await {
        Ok((_, refund)) => (
            axum::http::StatusCode::CREATED,
            Json(serde_json::json!({"success": true, "refund": refund})),
        )
            .into_response(),
        Err(e) => error_response(&e, axum::http::StatusCode::BAD_REQUEST),
    }
}
