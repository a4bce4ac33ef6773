use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::clients::telegram::DeliveryError;
use crate::types::ApiErrorResponse;

/// Application error codes following the pattern E{area}{sequence}
///
/// Ranges:
/// - E0xxx: Shared/infrastructure errors
/// - E1xxx: Profile errors
/// - E2xxx: Transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Shared (E0xxx)
    InternalError,
    Unauthorized,
    BadRequest,
    ServiceUnavailable,

    // Profile (E1xxx)
    ProfileNotFound,
    InvalidProfile,

    // Transport (E2xxx)
    DeliveryFailed,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            // Shared
            Self::InternalError => "E0001",
            Self::Unauthorized => "E0004",
            Self::BadRequest => "E0005",
            Self::ServiceUnavailable => "E0006",

            // Profile
            Self::ProfileNotFound => "E1001",
            Self::InvalidProfile => "E1002",

            // Transport
            Self::DeliveryFailed => "E2001",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable | Self::DeliveryFailed => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadRequest | Self::InvalidProfile => StatusCode::BAD_REQUEST,
            Self::ProfileNotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Known {
        code: ErrorCode,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("database pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn profile_not_found(telegram_id: i64) -> Self {
        Self::with_details(
            ErrorCode::ProfileNotFound,
            "profile not found",
            serde_json::json!({ "telegram_id": telegram_id }),
        )
    }

    /// True for "no such row" failures, whichever layer produced them.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::Known { code: ErrorCode::ProfileNotFound, .. }
                | AppError::Database(diesel::result::Error::NotFound)
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        Self::with_details(
            ErrorCode::InvalidProfile,
            "profile fields failed validation",
            serde_json::json!({ "fields": fields }),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, error_response) = match &self {
            AppError::Known { code, message, details } => {
                let mut resp = ApiErrorResponse::new(code.code(), message);
                if let Some(d) = details {
                    resp = resp.with_details(d.clone());
                }
                (*code, resp)
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                let code = ErrorCode::InternalError;
                (code, ApiErrorResponse::new(code.code(), "database error"))
            }
            AppError::Pool(err) => {
                tracing::error!(error = %err, "database pool error");
                let code = ErrorCode::ServiceUnavailable;
                (code, ApiErrorResponse::new(code.code(), "database unavailable"))
            }
            AppError::Delivery(err) => {
                tracing::warn!(error = %err, "delivery error");
                let code = ErrorCode::DeliveryFailed;
                (code, ApiErrorResponse::new(code.code(), "message delivery failed"))
            }
        };

        (code.status_code(), Json(error_response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
