//! REST handlers and their DTO mappers.
//!
//! Handlers stay thin: parse the request, call the matching domain service,
//! map the result through [`mappers`], and phrase the failure via
//! [`error_response`]. No business rules live here.

pub mod category_apis;
pub mod expense_apis;
pub mod income_apis;
pub mod mappers;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::domain::ServiceError;

/// Map a domain failure to its HTTP shape. Storage faults are logged with
/// their cause but reach the wire as an opaque 500.
pub(crate) fn error_response(err: ServiceError) -> Response {
    let status = match &err {
        ServiceError::Validation(_)
        | ServiceError::BudgetExceeded
        | ServiceError::EntryDateOutOfRange => StatusCode::BAD_REQUEST,
        ServiceError::CategoryNotFound
        | ServiceError::ExpenseNotFound
        | ServiceError::IncomeSourceNotFound => StatusCode::NOT_FOUND,
        ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = match &err {
        ServiceError::Storage(cause) => {
            error!("Storage failure: {}", cause);
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    (status, Json(json!({ "message": message }))).into_response()
}
