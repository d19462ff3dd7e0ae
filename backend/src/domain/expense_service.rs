//! Expense business logic.
//!
//! Orchestrates the expense store: applies the date default on creation,
//! guards filter arguments (inverted or missing date ranges, blank
//! categories, out-of-bounds months), and reduces raw amount fetches into
//! totals when the backing store has no native aggregation. Not-found on
//! read paths is an absent value, never an error; malformed filter input
//! degrades to an empty result or zero total rather than failing.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::commands::{CreateExpenseCommand, UpdateExpenseCommand};
use crate::domain::models::Expense;
use crate::storage::traits::{Connection, ExpenseStorage};

/// Service for managing expense records.
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> ExpenseService<C> {
    /// Create a new ExpenseService backed by the given connection
    pub fn new(connection: Arc<C>) -> Self {
        Self::with_clock(connection, Arc::new(SystemClock))
    }

    /// Create a new ExpenseService with an explicit clock
    pub fn with_clock(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        let expense_repository = connection.create_expense_repository();
        Self {
            expense_repository,
            clock,
        }
    }

    /// List every stored expense
    pub fn list_expenses(&self) -> Result<Vec<Expense>> {
        debug!("Listing all expenses");
        self.expense_repository.find_all()
    }

    /// Get an expense by ID
    pub fn get_expense(&self, id: &str) -> Result<Option<Expense>> {
        debug!("Getting expense: {}", id);
        self.expense_repository.find_by_id(id)
    }

    /// Create a new expense.
    /// The date defaults to the current date when the command carries none.
    pub fn create_expense(&self, command: CreateExpenseCommand) -> Result<Expense> {
        let date = command.date.unwrap_or_else(|| self.clock.today());

        let expense = Expense {
            id: None,
            description: command.description,
            amount: command.amount,
            date,
            category: command.category,
        };

        let created = self.expense_repository.save(&expense)?;
        info!(
            "Created expense {} ({} on {})",
            created.id.as_deref().unwrap_or_default(),
            created.amount,
            created.date
        );
        Ok(created)
    }

    /// Update an existing expense.
    ///
    /// Returns `None` without touching the store when the ID is unknown.
    /// Description, amount and category always replace the stored values;
    /// the date only when the command supplies one.
    pub fn update_expense(
        &self,
        id: &str,
        command: UpdateExpenseCommand,
    ) -> Result<Option<Expense>> {
        let Some(mut expense) = self.expense_repository.find_by_id(id)? else {
            warn!("Update of unknown expense {} ignored", id);
            return Ok(None);
        };

        expense.description = command.description;
        expense.amount = command.amount;
        expense.category = command.category;
        if let Some(date) = command.date {
            expense.date = date;
        }

        let updated = self.expense_repository.save(&expense)?;
        info!("Updated expense {}", id);
        Ok(Some(updated))
    }

    /// Delete an expense by ID.
    /// Returns whether a record was actually deleted.
    pub fn delete_expense(&self, id: &str) -> Result<bool> {
        if !self.expense_repository.exists_by_id(id)? {
            warn!("Delete of unknown expense {} ignored", id);
            return Ok(false);
        }

        self.expense_repository.delete_by_id(id)?;
        info!("Deleted expense {}", id);
        Ok(true)
    }

    /// List expenses in a category
    pub fn expenses_by_category(&self, category: &str) -> Result<Vec<Expense>> {
        debug!("Listing expenses in category '{}'", category);
        self.expense_repository.find_by_category(category)
    }

    /// List expenses dated within the range, inclusive both ends.
    /// A missing bound or an inverted range yields an empty list.
    pub fn expenses_by_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Expense>> {
        let Some((start, end)) = valid_range(start, end) else {
            return Ok(Vec::new());
        };
        self.expense_repository.find_by_date_between(start, end)
    }

    /// Total spend within the range, inclusive both ends.
    /// A missing bound or an inverted range yields zero.
    pub fn total_by_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Decimal> {
        let Some((start, end)) = valid_range(start, end) else {
            return Ok(Decimal::ZERO);
        };

        let amounts = self
            .expense_repository
            .find_amounts_by_date_between(start, end)?;
        Ok(amounts.into_iter().fold(Decimal::ZERO, |acc, a| acc + a))
    }

    /// Total spend in a category. A blank category yields zero.
    pub fn total_by_category(&self, category: &str) -> Result<Decimal> {
        if category.trim().is_empty() {
            return Ok(Decimal::ZERO);
        }

        let amounts = self.expense_repository.find_amounts_by_category(category)?;
        Ok(amounts.into_iter().fold(Decimal::ZERO, |acc, a| acc + a))
    }

    /// List expenses in a category dated within the range, inclusive both
    /// ends. A blank category, a missing bound or an inverted range yields
    /// an empty list.
    pub fn expenses_by_category_and_date_range(
        &self,
        category: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Expense>> {
        if category.trim().is_empty() {
            return Ok(Vec::new());
        }
        let Some((start, end)) = valid_range(start, end) else {
            return Ok(Vec::new());
        };
        self.expense_repository
            .find_by_category_and_date_between(category, start, end)
    }

    /// List expenses for a calendar month.
    /// A non-positive year or a month outside 1..=12 yields an empty list.
    pub fn expenses_by_month(&self, year: i32, month: u32) -> Result<Vec<Expense>> {
        if year <= 0 || !(1..=12).contains(&month) {
            return Ok(Vec::new());
        }
        self.expense_repository.find_by_month_and_year(year, month)
    }

    /// Per-month spend totals for a year.
    ///
    /// Always returns exactly twelve entries keyed 1 through 12 in month
    /// order, zero-filled for months with no expenses.
    pub fn monthly_summary(&self, year: i32) -> Result<BTreeMap<u32, Decimal>> {
        let mut summary: BTreeMap<u32, Decimal> =
            (1..=12).map(|month| (month, Decimal::ZERO)).collect();

        for expense in self
            .expense_repository
            .find_expenses_for_monthly_summary(year)?
        {
            if let Some(total) = summary.get_mut(&expense.date.month()) {
                *total += expense.amount;
            }
        }

        Ok(summary)
    }
}

/// Both bounds present and not inverted, or nothing.
fn valid_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<(NaiveDate, NaiveDate)> {
    match (start, end) {
        (Some(start), Some(end)) if start <= end => Some((start, end)),
        _ => None,
    }
}
