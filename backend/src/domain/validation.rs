//! Field validation for expense payloads.
//!
//! Runs before the service layer on create/update. All violated fields are
//! collected into a single field-name to message map rather than failing on
//! the first problem, so the transport layer can report everything at once.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use thiserror::Error;

const DESCRIPTION_MAX_CHARS: usize = 255;
const CATEGORY_MAX_CHARS: usize = 100;

/// Aggregated field validation failures, keyed by field name.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid expense payload: {} field(s) failed validation", .field_errors.len())]
pub struct ValidationErrors {
    pub field_errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn into_response(self) -> shared::ValidationErrorResponse {
        shared::ValidationErrorResponse {
            errors: self.field_errors,
        }
    }
}

/// Validate an expense payload against the field-level rules.
///
/// A missing date is allowed: creation defaults it to the current date and
/// updates interpret it as "keep the stored date". A supplied date must not
/// be in the future relative to `today`.
pub fn validate_expense_payload(
    description: &str,
    amount: Decimal,
    date: Option<NaiveDate>,
    category: &str,
    today: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut field_errors = BTreeMap::new();

    if description.trim().is_empty() {
        field_errors.insert(
            "description".to_string(),
            "Description cannot be empty".to_string(),
        );
    } else if description.chars().count() > DESCRIPTION_MAX_CHARS {
        field_errors.insert(
            "description".to_string(),
            "Description cannot exceed 255 characters".to_string(),
        );
    }

    // Smallest representable amount is one cent
    if amount < Decimal::new(1, 2) {
        field_errors.insert(
            "amount".to_string(),
            "Amount must be greater than zero".to_string(),
        );
    }

    if let Some(date) = date {
        if date > today {
            field_errors.insert("date".to_string(), "Date cannot be in the future".to_string());
        }
    }

    if category.trim().is_empty() {
        field_errors.insert(
            "category".to_string(),
            "Category cannot be empty".to_string(),
        );
    } else if category.chars().count() > CATEGORY_MAX_CHARS {
        field_errors.insert(
            "category".to_string(),
            "Category cannot exceed 100 characters".to_string(),
        );
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { field_errors })
    }
}
