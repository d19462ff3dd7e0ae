//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::models::Expense;

/// Trait defining the interface for expense storage operations.
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// (SQL databases, CSV files, etc.) without modification.
///
/// No ordering guarantee is made for sequence results; callers must not
/// depend on insertion or date order.
pub trait ExpenseStorage: Send + Sync {
    /// Retrieve every stored expense
    fn find_all(&self) -> Result<Vec<Expense>>;

    /// Retrieve a specific expense by ID
    fn find_by_id(&self, id: &str) -> Result<Option<Expense>>;

    /// Insert or update an expense.
    /// Assigns an opaque ID when the record has none; otherwise overwrites
    /// the record matching its ID. Returns the persisted record.
    fn save(&self, expense: &Expense) -> Result<Expense>;

    /// Check whether an expense with the given ID exists
    fn exists_by_id(&self, id: &str) -> Result<bool>;

    /// Delete the expense with the given ID.
    /// Callers check existence first; deleting an unknown ID is a no-op.
    fn delete_by_id(&self, id: &str) -> Result<()>;

    /// Retrieve all expenses in the given category
    fn find_by_category(&self, category: &str) -> Result<Vec<Expense>>;

    /// Retrieve all expenses dated within the range, inclusive both ends
    fn find_by_date_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Expense>>;

    /// Retrieve all expenses in the category dated within the range,
    /// inclusive both ends
    fn find_by_category_and_date_between(
        &self,
        category: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>>;

    /// Retrieve all expenses dated within the given calendar month
    fn find_by_month_and_year(&self, year: i32, month: u32) -> Result<Vec<Expense>>;

    /// Raw amount fetch for date-range totals, for backends without native
    /// aggregation. The domain layer reduces the amounts itself.
    fn find_amounts_by_date_between(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<Decimal>>;

    /// Raw amount fetch for category totals
    fn find_amounts_by_category(&self, category: &str) -> Result<Vec<Decimal>>;

    /// Retrieve all expenses dated within the given year, for the monthly
    /// summary computation
    fn find_expenses_for_monthly_summary(&self, year: i32) -> Result<Vec<Expense>>;
}

/// Trait defining the interface for storage connections.
///
/// This trait abstracts away the specific connection type (database, CSV
/// files, etc.) and provides factory methods for creating repositories, so
/// the domain layer can work with any storage backend without knowing the
/// implementation details.
pub trait Connection: Send + Sync + Clone {
    /// The type of ExpenseStorage this connection creates
    type ExpenseRepository: ExpenseStorage;

    /// Create a new expense repository for this connection
    fn create_expense_repository(&self) -> Self::ExpenseRepository;
}
