//! # API Error Type
//!
//! What the presentation layer receives when an operation fails.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Nellito Stock                          │
//! │                                                                         │
//! │  LedgerError::Validation        ──► VALIDATION_ERROR                   │
//! │  LedgerError::ProductNotFound   ──► NOT_FOUND                          │
//! │  LedgerError::InsufficientStock ──► INSUFFICIENT_STOCK                 │
//! │  DbError (startup load/open)    ──► DATABASE_ERROR                     │
//! │  ConfigError                    ──► CONFIG_ERROR                       │
//! │                                                                         │
//! │  Save failures after a mutation are logged, not returned.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages lead with the shop's familiar wording and append the detail.

use serde::Serialize;
use std::fmt;

use nellito_core::LedgerError;
use nellito_db::DbError;

use crate::config::ConfigError;

/// API error returned from controller operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient quantity in stock: Waffle has 3, 5 requested"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing or malformed input
    ValidationError,

    /// Product not in the ledger
    NotFound,

    /// Exit larger than quantity on hand
    InsufficientStock,

    /// Storage could not be opened or read
    DatabaseError,

    /// Configuration could not be loaded
    ConfigError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }
}

/// Converts ledger errors to API errors.
impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(e) => ApiError::new(
                ErrorCode::ValidationError,
                format!("Fill in all fields correctly: {}", e),
            ),
            LedgerError::ProductNotFound(product) => ApiError::new(
                ErrorCode::NotFound,
                format!("Product not found: {}", product),
            ),
            LedgerError::InsufficientStock {
                product,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient quantity in stock: {} has {}, {} requested",
                    product, available, requested
                ),
            ),
        }
    }
}

/// Converts storage errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::CorruptLedger { key, source } => {
                tracing::error!(key = %key, error = %source, "Stored ledger is unreadable");
                ApiError::new(
                    ErrorCode::DatabaseError,
                    format!("Stored stock data under '{}' is unreadable", key),
                )
            }
            other => {
                tracing::error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for controller operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use nellito_core::ValidationError;

    #[test]
    fn test_ledger_errors_map_to_distinct_codes() {
        let validation: ApiError = LedgerError::from(ValidationError::Required {
            field: "product".into(),
        })
        .into();
        assert_eq!(validation.code, ErrorCode::ValidationError);
        assert_eq!(
            validation.message,
            "Fill in all fields correctly: product is required"
        );

        let not_found: ApiError = LedgerError::ProductNotFound("Ghost".into()).into();
        assert_eq!(not_found.code, ErrorCode::NotFound);
        assert_eq!(not_found.to_string(), "[NOT_FOUND] Product not found: Ghost");

        let insufficient: ApiError = LedgerError::InsufficientStock {
            product: "Waffle".into(),
            available: 3,
            requested: 5,
        }
        .into();
        assert_eq!(insufficient.code, ErrorCode::InsufficientStock);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::new(ErrorCode::NotFound, "Product not found: Ghost");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: Ghost");
    }

    #[test]
    fn test_db_error_hides_internals() {
        let api: ApiError = DbError::QueryFailed("no such table: kv_store".into()).into();
        assert_eq!(api.code, ErrorCode::DatabaseError);
        assert_eq!(api.message, "Database operation failed");
    }
}
