use std::time::Duration;

use axum::response::IntoResponse;
use http::StatusCode;
use thiserror::Error;
use tracing::error;

use crate::external::secret_provider::SecretError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please provide the '{0}' query parameter.")]
    MissingParameter(&'static str),
    // Both raw inputs are kept so the handler can log exactly what was sent.
    #[error("Please provide valid numbers for '{field}'.")]
    InvalidNumber {
        field: &'static str,
        investment: String,
        gains: String,
    },
    #[error("Investment must be a positive number.")]
    InvalidInvestment,
    #[error("Gains cannot be negative.")]
    InvalidGains,
    #[error("Annual cash flow cannot be zero.")]
    InvalidCashFlow,
    #[error("The inputs produce a result too large to represent.")]
    ResultOutOfRange,
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_)
            | AppError::InvalidNumber { .. }
            | AppError::InvalidInvestment
            | AppError::InvalidGains
            | AppError::InvalidCashFlow
            | AppError::ResultOutOfRange => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
            return (status, "An internal error occurred. Please try again later.").into_response();
        }
        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection string unavailable: {0}")]
    Secret(#[from] SecretError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("authentication rejected by record store")]
    Unauthorized,
    #[error("record store timed out after {0:?}")]
    Timeout(Duration),
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        AppError::StoreUnavailable(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_validation_errors_are_plain_400s() {
        let (status, body) = body_text(AppError::InvalidInvestment).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Investment must be a positive number.");

        let (status, body) = body_text(AppError::MissingParameter("gains")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("gains"));
    }

    #[tokio::test]
    async fn test_server_errors_do_not_leak_detail() {
        let (status, body) =
            body_text(AppError::StoreUnavailable("password authentication failed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("password"));
    }
}
