//! # Error Types
//!
//! Domain-specific error types for nellito-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nellito-core errors (this file)                                       │
//! │  ├── LedgerError      - Outcome of a rejected mutation                 │
//! │  ├── ValidationError  - Malformed or missing form input                │
//! │  └── CodecError       - Persisted blob could not become a Ledger       │
//! │                                                                         │
//! │  nellito-db errors (separate crate)                                    │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  app errors                                                            │
//! │  └── ApiError         - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → LedgerError → ApiError → User feedback        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `LedgerError` is raised before the ledger is touched, so a failed
//! call leaves the ledger exactly as it was.

use thiserror::Error;

// =============================================================================
// Ledger Error
// =============================================================================

/// A mutating ledger operation was rejected.
///
/// Exactly one variant fires per invalid call, checked in declaration order:
/// validation first, then lookup, then sufficiency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Form input was malformed or missing.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Entry or exit referenced a product the ledger does not hold.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Exit asked for more than is on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Exit (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Waffle", available: 3, requested: 5 }
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: u32,
        requested: u32,
    },
}

impl LedgerError {
    /// Coarse classification for the presentation boundary.
    pub fn kind(&self) -> LedgerErrorKind {
        match self {
            LedgerError::Validation(_) => LedgerErrorKind::Validation,
            LedgerError::ProductNotFound(_) => LedgerErrorKind::NotFound,
            LedgerError::InsufficientStock { .. } => LedgerErrorKind::InsufficientStock,
        }
    }
}

/// The three non-overlapping failure classes of a ledger mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerErrorKind {
    Validation,
    NotFound,
    InsufficientStock,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while turning raw form text into typed values, and when
/// constructing a ledger from records that would break its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: u64, max: u64 },

    /// Text could not be read as the expected kind of value.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An increment would push a quantity past what it can hold.
    #[error("{product} has {current} units; adding {added} would exceed the maximum of {max}")]
    QuantityOverflow {
        product: String,
        current: u32,
        added: u32,
        max: u32,
    },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value where uniqueness is required.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Adding stock under a different category than the product already has.
    #[error("{product} is already stocked under {existing}, not {requested}")]
    CategoryMismatch {
        product: String,
        existing: String,
        requested: String,
    },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Codec Error
// =============================================================================

/// A persisted ledger blob could not be turned back into a [`Ledger`](crate::Ledger).
#[derive(Debug, Error)]
pub enum CodecError {
    /// Not JSON, wrong shape, or a field of the wrong type (e.g. a negative
    /// quantity).
    #[error("Malformed ledger data: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Well-formed records that break a ledger invariant.
    #[error("Invalid ledger data: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Malformed(err)
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Convenience type alias for codec Results.
pub type CodecResult<T> = Result<T, CodecError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LedgerError::InsufficientStock {
            product: "Waffle".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Waffle: available 3, requested 5"
        );

        let err = LedgerError::ProductNotFound("Ghost".to_string());
        assert_eq!(err.to_string(), "Product not found: Ghost");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("product").to_string(),
            "product is required"
        );

        let err = ValidationError::CategoryMismatch {
            product: "Waffle".to_string(),
            existing: "Cone".to_string(),
            requested: "Topping".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Waffle is already stocked under Cone, not Topping"
        );
    }

    #[test]
    fn test_validation_converts_to_ledger_error() {
        let ledger_err: LedgerError = ValidationError::required("quantity").into();
        assert!(matches!(ledger_err, LedgerError::Validation(_)));
        assert_eq!(ledger_err.kind(), LedgerErrorKind::Validation);
    }

    #[test]
    fn test_error_kinds_do_not_overlap() {
        assert_eq!(
            LedgerError::ProductNotFound("x".into()).kind(),
            LedgerErrorKind::NotFound
        );
        assert_eq!(
            LedgerError::InsufficientStock {
                product: "x".into(),
                available: 0,
                requested: 1
            }
            .kind(),
            LedgerErrorKind::InsufficientStock
        );
    }
}
