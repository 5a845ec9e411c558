//! # Validation Module
//!
//! Turns raw form text into typed ledger inputs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (form / CLI)                                    │
//! │  └── Collects raw strings, no interpretation                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── category ∈ configured set                                         │
//! │  ├── product non-empty                                                 │
//! │  └── quantity: integer text, > 0, fits u32                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledger                                                        │
//! │  ├── product exists (entry / exit)                                     │
//! │  └── enough on hand (exit)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantities are never coerced: `"3abc"`, `"3.5"` and `""` are rejected
//! rather than read as a partial number.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::LedgerSettings;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a category against the configured set.
///
/// ## Rules
/// - Must not be empty (nothing picked)
/// - Must exactly match one configured category
///
/// ## Example
/// ```rust
/// use nellito_core::validation::validate_category;
/// use nellito_core::LedgerSettings;
///
/// let settings = LedgerSettings::default();
/// assert!(validate_category("Cone", &settings).is_ok());
/// assert!(validate_category("", &settings).is_err());
/// assert!(validate_category("Soda", &settings).is_err());
/// ```
pub fn validate_category<'a>(category: &'a str, settings: &LedgerSettings) -> ValidationResult<&'a str> {
    if category.is_empty() {
        return Err(ValidationError::required("category"));
    }

    if !settings.is_known_category(category) {
        return Err(ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: settings.categories.clone(),
        });
    }

    Ok(category)
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Returned unchanged: the ledger key is the exact text given
///
/// ## Example
/// ```rust
/// use nellito_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("Waffle").unwrap(), "Waffle");
/// assert!(validate_product_name("").is_err());
/// assert_eq!(validate_product_name("   ").unwrap(), "   ");
/// ```
pub fn validate_product_name(product: &str) -> ValidationResult<&str> {
    if product.is_empty() {
        return Err(ValidationError::required("product"));
    }

    Ok(product)
}

/// Parses a quantity typed by the user.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Optional sign, then decimal digits only
/// - Must be positive (> 0)
/// - Must fit in `u32`
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  User types quantity: "12"                                             │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  parse_quantity("12") ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── empty?          → Required                                   │
/// │       ├── not an integer? → InvalidFormat                              │
/// │       ├── <= 0?           → MustBePositive                             │
/// │       ├── > u32::MAX?     → OutOfRange                                 │
/// │       └── OK(12)                                                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_quantity(raw: &str) -> ValidationResult<u32> {
    let text = raw.trim();

    if text.is_empty() {
        return Err(ValidationError::required("quantity"));
    }

    let (negative, digits) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must be a whole number".to_string(),
        });
    }

    let is_zero = digits.bytes().all(|b| b == b'0');
    if negative || is_zero {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    // Only overflow is left as a failure mode: digits are all ASCII.
    digits.parse::<u32>().map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: u32::MAX as u64,
    })
}

// =============================================================================
// Requests
// =============================================================================

/// Raw "add product" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddStockRequest {
    pub category: String,
    pub product: String,
    pub quantity: String,
}

/// Validated "add product" input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStock<'a> {
    pub category: &'a str,
    pub product: &'a str,
    pub quantity: u32,
}

impl AddStockRequest {
    pub fn new(
        category: impl Into<String>,
        product: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        AddStockRequest {
            category: category.into(),
            product: product.into(),
            quantity: quantity.into(),
        }
    }

    /// Checks every field, in form order, against `settings`.
    pub fn validate(&self, settings: &LedgerSettings) -> ValidationResult<NewStock<'_>> {
        Ok(NewStock {
            category: validate_category(&self.category, settings)?,
            product: validate_product_name(&self.product)?,
            quantity: parse_quantity(&self.quantity)?,
        })
    }
}

/// Raw entry / exit movement form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MovementRequest {
    pub product: String,
    pub quantity: String,
}

/// Validated movement input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement<'a> {
    pub product: &'a str,
    pub quantity: u32,
}

impl MovementRequest {
    pub fn new(product: impl Into<String>, quantity: impl Into<String>) -> Self {
        MovementRequest {
            product: product.into(),
            quantity: quantity.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult<Movement<'_>> {
        Ok(Movement {
            product: validate_product_name(&self.product)?,
            quantity: parse_quantity(&self.quantity)?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_accepts_whole_numbers() {
        assert_eq!(parse_quantity("1").unwrap(), 1);
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
        assert_eq!(parse_quantity("+7").unwrap(), 7);
        assert_eq!(parse_quantity("007").unwrap(), 7);
        assert_eq!(parse_quantity("4294967295").unwrap(), u32::MAX);
    }

    #[test]
    fn test_parse_quantity_rejects_non_numbers() {
        assert!(matches!(
            parse_quantity(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_quantity("   "),
            Err(ValidationError::Required { .. })
        ));
        for raw in ["abc", "3abc", "3.5", "1e3", "-", "+", "NaN", "½"] {
            assert!(
                matches!(parse_quantity(raw), Err(ValidationError::InvalidFormat { .. })),
                "{raw:?} should be InvalidFormat"
            );
        }
    }

    #[test]
    fn test_parse_quantity_rejects_non_positive() {
        for raw in ["0", "000", "-1", "-0", "-99999999999999"] {
            assert!(
                matches!(parse_quantity(raw), Err(ValidationError::MustBePositive { .. })),
                "{raw:?} should be MustBePositive"
            );
        }
    }

    #[test]
    fn test_parse_quantity_rejects_overflow() {
        assert!(matches!(
            parse_quantity("4294967296"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_category() {
        let settings = LedgerSettings::default();
        assert_eq!(validate_category("Topping", &settings).unwrap(), "Topping");
        assert!(matches!(
            validate_category("", &settings),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_category("topping", &settings),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_validate_product_name_keeps_exact_text() {
        assert_eq!(validate_product_name(" Waffle ").unwrap(), " Waffle ");
        assert_eq!(validate_product_name("  ").unwrap(), "  ");
        assert!(validate_product_name("").is_err());
    }

    #[test]
    fn test_add_request_reports_first_bad_field() {
        let settings = LedgerSettings::default();

        let err = AddStockRequest::new("", "", "x").validate(&settings).unwrap_err();
        assert_eq!(err, ValidationError::required("category"));

        let err = AddStockRequest::new("Cone", "", "x").validate(&settings).unwrap_err();
        assert_eq!(err, ValidationError::required("product"));

        let err = AddStockRequest::new("Cone", "Waffle", "x")
            .validate(&settings)
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));

        let request = AddStockRequest::new("Cone", "Waffle", "3");
        let ok = request.validate(&settings).unwrap();
        assert_eq!(
            ok,
            NewStock {
                category: "Cone",
                product: "Waffle",
                quantity: 3
            }
        );
    }

    #[test]
    fn test_movement_request() {
        let request = MovementRequest::new("Waffle", "2");
        let ok = request.validate().unwrap();
        assert_eq!(ok.quantity, 2);
        assert!(MovementRequest::new("", "2").validate().is_err());
        assert!(MovementRequest::new("Waffle", "0").validate().is_err());
    }
}
