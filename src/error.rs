use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("Payment not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    pub fn validation(message: impl Into<String>) -> Self {
        PaymentError::Validation(vec![message.into()])
    }

    pub fn messages(&self) -> Vec<String> {
        match self {
            PaymentError::Validation(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub errors: Vec<String>,
}

impl ErrorBody {
    pub fn from_messages(errors: Vec<String>) -> Self {
        Self { success: false, errors }
    }
}

// Lookups that miss answer 404 on reads but 400 on actions, so the
// handler picks the status for NotFound.
pub fn error_response(err: &PaymentError, not_found_status: StatusCode) -> Response {
    let status = match err {
        PaymentError::Validation(_) | PaymentError::InvalidState(_) => StatusCode::BAD_REQUEST,
        PaymentError::NotFound(_) => not_found_status,
        PaymentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorBody::from_messages(err.messages()))).into_response()
}

pub fn rejection_response(rejection: JsonRejection) -> Response {
    let message = match &rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid request body: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON".to_string(),
        JsonRejection::MissingJsonContentType(_) => {
            "Content-Type must be application/json".to_string()
        }
        _ => "Request body could not be read".to_string(),
    };
    (StatusCode::BAD_REQUEST, Json(ErrorBody::from_messages(vec![message]))).into_response()
}
