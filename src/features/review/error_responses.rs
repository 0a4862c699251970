use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::errors::ReviewError;

impl ReviewError {
    pub fn status(&self) -> StatusCode {
        match self {
            ReviewError::Validation(_) => StatusCode::BAD_REQUEST,
            ReviewError::Unauthorized => StatusCode::UNAUTHORIZED,
            ReviewError::Forbidden => StatusCode::FORBIDDEN,
            ReviewError::NoDueCards => StatusCode::UNPROCESSABLE_ENTITY,
            ReviewError::SessionNotFound
            | ReviewError::FlashcardNotFound(_)
            | ReviewError::FlashcardNotInSession { .. } => StatusCode::NOT_FOUND,
            ReviewError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ReviewError::DatabaseError(_) | ReviewError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            log::error!("Review request failed: {}", self);
        }

        let body = json!({
            "error": self.to_string(),
            "code": self.code(),
            "status": status.as_u16(),
            "retryable": self.is_retryable(),
        });

        (status, axum::Json(body)).into_response()
    }
}
