use crate::domain::error::{ErrorKind, PaymentError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype over the domain error so the HTTP mapping lives in the adapter
/// layer and nowhere else.
pub struct ApiError(pub PaymentError);

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self.0.kind() {
            ErrorKind::BadRequest => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                self.0.message().to_string(),
            ),
            ErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                self.0.message().to_string(),
            ),
            // No detail leakage about why verification failed.
            ErrorKind::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                "authentication failed".to_string(),
            ),
            ErrorKind::Unsupported => (
                StatusCode::BAD_REQUEST,
                "unsupported",
                self.0.message().to_string(),
            ),
            ErrorKind::Internal => {
                tracing::error!("internal error: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error_code": error_code,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
