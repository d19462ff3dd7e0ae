//! Mapping between domain models and the shared payload types.

use rust_decimal::Decimal;
use shared::{ExpenseDto, MonthlySummaryResponse, MonthlyTotal};
use std::collections::BTreeMap;

use crate::domain::models::Expense;

/// Map a persisted expense to its DTO.
/// Persisted records always carry an id; an unassigned one maps to empty.
pub fn expense_to_dto(expense: &Expense) -> ExpenseDto {
    ExpenseDto {
        id: expense.id.clone().unwrap_or_default(),
        description: expense.description.clone(),
        amount: expense.amount,
        date: expense.date,
        category: expense.category.clone(),
    }
}

/// Map a month-keyed summary to the ordered response shape.
pub fn summary_to_response(year: i32, summary: BTreeMap<u32, Decimal>) -> MonthlySummaryResponse {
    MonthlySummaryResponse {
        year,
        months: summary
            .into_iter()
            .map(|(month, total)| MonthlyTotal { month, total })
            .collect(),
    }
}
