//! Command payloads for expense mutations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{CreateExpenseRequest, UpdateExpenseRequest};

/// Payload for creating a new expense. The date defaults to the current
/// date when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateExpenseCommand {
    pub description: String,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub category: String,
}

/// Payload for updating an existing expense. Description, amount and
/// category always replace the stored values; the date is only replaced
/// when one is supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpenseCommand {
    pub description: String,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub category: String,
}

impl From<CreateExpenseRequest> for CreateExpenseCommand {
    fn from(request: CreateExpenseRequest) -> Self {
        Self {
            description: request.description,
            amount: request.amount,
            date: request.date,
            category: request.category,
        }
    }
}

impl From<UpdateExpenseRequest> for UpdateExpenseCommand {
    fn from(request: UpdateExpenseRequest) -> Self {
        Self {
            description: request.description,
            amount: request.amount,
            date: request.date,
            category: request.category,
        }
    }
}
