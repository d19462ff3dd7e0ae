//! # Expense Tracker Backend
//!
//! Service-layer business logic for tracking personal expenses: CRUD over
//! expense records plus category/date-range filtering and monthly
//! aggregation. Transport concerns live upstream; this crate exposes a
//! procedural contract in terms of the `shared` payload types and talks to
//! storage through the `ExpenseStorage` trait. The bundled backend is a
//! CSV file store.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub mod domain;
pub mod storage;

pub use domain::{Clock, ExpenseService, SystemClock, ValidationErrors};
pub use storage::CsvConnection;

use domain::{mappers, validate_expense_payload};
use shared::{
    CreateExpenseRequest, ExpenseDto, MonthlySummaryResponse, UpdateExpenseRequest,
};

/// Facade wiring the expense service to a storage connection.
///
/// Consumed by an upstream transport layer: payloads come in as `shared`
/// request types, get field-validated here, and results go back out as
/// `shared` DTOs. Not-found surfaces as `None`/`false`, never as an error.
pub struct Backend {
    expense_service: ExpenseService<CsvConnection>,
    clock: Arc<dyn Clock>,
}

impl Backend {
    /// Create a backend storing data under the given directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Self::with_clock(data_dir, Arc::new(SystemClock))
    }

    /// Create a backend with an explicit clock (deterministic tests)
    pub fn with_clock<P: AsRef<Path>>(data_dir: P, clock: Arc<dyn Clock>) -> Result<Self> {
        let connection = Arc::new(CsvConnection::new(data_dir)?);
        info!(
            "Expense tracker backend using data directory {}",
            connection.base_directory().display()
        );
        let expense_service = ExpenseService::with_clock(connection, clock.clone());
        Ok(Self {
            expense_service,
            clock,
        })
    }

    /// List every stored expense
    pub fn list_expenses(&self) -> Result<Vec<ExpenseDto>> {
        let expenses = self.expense_service.list_expenses()?;
        Ok(expenses.iter().map(mappers::expense_to_dto).collect())
    }

    /// Get an expense by ID
    pub fn get_expense(&self, id: &str) -> Result<Option<ExpenseDto>> {
        let expense = self.expense_service.get_expense(id)?;
        Ok(expense.as_ref().map(mappers::expense_to_dto))
    }

    /// Create an expense from a request payload.
    /// Fails with [`ValidationErrors`] when field validation rejects the
    /// payload; the error carries the full field-to-message map.
    pub fn create_expense(&self, request: CreateExpenseRequest) -> Result<ExpenseDto> {
        validate_expense_payload(
            &request.description,
            request.amount,
            request.date,
            &request.category,
            self.clock.today(),
        )?;

        let created = self.expense_service.create_expense(request.into())?;
        Ok(mappers::expense_to_dto(&created))
    }

    /// Update an expense from a request payload.
    /// Returns `None` when the ID is unknown; validation failures carry the
    /// field-to-message map as with create.
    pub fn update_expense(
        &self,
        id: &str,
        request: UpdateExpenseRequest,
    ) -> Result<Option<ExpenseDto>> {
        validate_expense_payload(
            &request.description,
            request.amount,
            request.date,
            &request.category,
            self.clock.today(),
        )?;

        let updated = self.expense_service.update_expense(id, request.into())?;
        Ok(updated.as_ref().map(mappers::expense_to_dto))
    }

    /// Delete an expense by ID; returns whether a record was deleted
    pub fn delete_expense(&self, id: &str) -> Result<bool> {
        self.expense_service.delete_expense(id)
    }

    /// List expenses in a category
    pub fn expenses_by_category(&self, category: &str) -> Result<Vec<ExpenseDto>> {
        let expenses = self.expense_service.expenses_by_category(category)?;
        Ok(expenses.iter().map(mappers::expense_to_dto).collect())
    }

    /// List expenses within a date range; invalid ranges yield an empty list
    pub fn expenses_by_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<ExpenseDto>> {
        let expenses = self.expense_service.expenses_by_date_range(start, end)?;
        Ok(expenses.iter().map(mappers::expense_to_dto).collect())
    }

    /// Total spend within a date range; invalid ranges yield zero
    pub fn total_by_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Decimal> {
        self.expense_service.total_by_date_range(start, end)
    }

    /// Total spend in a category; a blank category yields zero
    pub fn total_by_category(&self, category: &str) -> Result<Decimal> {
        self.expense_service.total_by_category(category)
    }

    /// List expenses in a category within a date range; any invalid input
    /// yields an empty list
    pub fn expenses_by_category_and_date_range(
        &self,
        category: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<ExpenseDto>> {
        let expenses =
            self.expense_service
                .expenses_by_category_and_date_range(category, start, end)?;
        Ok(expenses.iter().map(mappers::expense_to_dto).collect())
    }

    /// List expenses for a calendar month; out-of-bounds input yields an
    /// empty list
    pub fn expenses_by_month(&self, year: i32, month: u32) -> Result<Vec<ExpenseDto>> {
        let expenses = self.expense_service.expenses_by_month(year, month)?;
        Ok(expenses.iter().map(mappers::expense_to_dto).collect())
    }

    /// Twelve-entry per-month spend breakdown for a year
    pub fn monthly_summary(&self, year: i32) -> Result<MonthlySummaryResponse> {
        let summary = self.expense_service.monthly_summary(year)?;
        Ok(mappers::summary_to_response(year, summary))
    }
}
