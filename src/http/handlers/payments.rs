use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::domain::payment::CreatePaymentRequest;
use crate::error::{error_response, rejection_response, ErrorBody};
use crate::ledger::ListQuery;
use crate::AppState;

pub async fn create_payment(
    State(state): State<AppState>,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(rejection),
    };

    match state.payment_service.create(request).await {
        Ok(payment) => (
            axum::http::StatusCode::CREATED,
            Json(serde_json::json!({"success": true, "payment": payment})),
        )
            .into_response(),
        Err(e) => error_response(&e, axum::http::StatusCode::BAD_REQUEST),
    }
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    match state.payment_service.get(&payment_id).await {
        Ok(payment) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"success": true, "payment": payment})),
        )
            .into_response(),
        Err(e) => error_response(&e, axum::http::StatusCode::NOT_FOUND),
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub merchant_id: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

pub async fn list_payments(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> impl IntoResponse {
    let Query(params) = match params {
        Ok(query) => query,
        Err(rejection) => {
            return (
                axum::http::StatusCode::BAD_REQUEST,
                Json(ErrorBody::from_messages(vec![format!(
                    "Invalid query parameters: {}",
                    rejection.body_text()
                )])),
            )
                .into_response()
        }
    };

    let page = state
        .payment_service
        .list(ListQuery {
            merchant_id: params.merchant_id,
            limit: params.limit,
            offset: params.offset,
        })
        .await;

    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "payments": page.payments,
            "total": page.total,
            "offset": page.offset,
            "limit": page.limit,
        })),
    )
        .into_response()
}

pub async fn process_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    match state.payment_service.process(&payment_id).await {
        Ok(payment) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"success": true, "payment": payment})),
        )
            .into_response(),
        // action endpoints report a bad id as a bad request
        Err(e) => error_response(&e, axum::http::StatusCode::BAD_REQUEST),
    }
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    match state.payment_service.transactions(&payment_id).await {
        Ok(transactions) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"success": true, "transactions": transactions})),
        )
            .into_response(),
        Err(e) => error_response(&e, axum::http::StatusCode::NOT_FOUND),
    }
}
