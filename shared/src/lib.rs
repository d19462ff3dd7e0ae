//! Payload types shared between the expense tracker backend and whatever
//! transport layer sits in front of it. These are the serde-facing shapes;
//! the backend keeps its own domain model and maps at the boundary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A persisted expense as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDto {
    /// Opaque store-assigned identifier
    pub id: String,
    /// Description of the expense (max 255 characters)
    pub description: String,
    /// Positive decimal amount, exact precision
    pub amount: Decimal,
    /// Calendar date of the expense (never in the future)
    pub date: NaiveDate,
    /// Free-form category label (max 100 characters)
    pub category: String,
}

/// Payload for creating a new expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub description: String,
    pub amount: Decimal,
    /// Defaults to the current date when omitted
    pub date: Option<NaiveDate>,
    pub category: String,
}

/// Payload for updating an existing expense.
///
/// Description, amount and category always replace the stored values;
/// the date is only replaced when one is supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    pub description: String,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub category: String,
}

/// Total spend for a single month of a summary year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Month number, 1 through 12
    pub month: u32,
    pub total: Decimal,
}

/// Twelve-entry per-month spend breakdown for one year.
///
/// Always contains exactly twelve entries in month order, zero-filled for
/// months with no expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummaryResponse {
    pub year: i32,
    pub months: Vec<MonthlyTotal>,
}

/// Field-level validation failures for a create/update payload, keyed by
/// field name. The transport layer renders this map directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn create_request_round_trips_through_json() {
        let request = CreateExpenseRequest {
            description: "Coffee".to_string(),
            amount: Decimal::from_str("3.50").unwrap(),
            date: Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
            category: "Food".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        let parsed: CreateExpenseRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn create_request_accepts_missing_date() {
        let json = r#"{"description":"Bus ticket","amount":"2.75","category":"Transport"}"#;
        let parsed: CreateExpenseRequest = serde_json::from_str(json).unwrap();
        assert!(parsed.date.is_none());
        assert_eq!(parsed.amount, Decimal::from_str("2.75").unwrap());
    }

    #[test]
    fn expense_dto_serializes_amount_exactly() {
        let dto = ExpenseDto {
            id: "expense::abc".to_string(),
            description: "Groceries".to_string(),
            amount: Decimal::from_str("19.99").unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            category: "Food".to_string(),
        };

        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("\"19.99\""));
        assert!(json.contains("\"2024-01-15\""));
    }

    #[test]
    fn validation_errors_keep_field_order() {
        let mut errors = BTreeMap::new();
        errors.insert("amount".to_string(), "Amount must be greater than zero".to_string());
        errors.insert("description".to_string(), "Description cannot be empty".to_string());
        let response = ValidationErrorResponse { errors };

        let json = serde_json::to_string(&response).unwrap();
        let parsed: ValidationErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.errors.len(), 2);
        assert_eq!(
            parsed.errors.get("description").map(String::as_str),
            Some("Description cannot be empty")
        );
    }
}
