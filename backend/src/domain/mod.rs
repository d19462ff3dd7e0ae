//! Domain layer: expense business logic and its supporting types.

pub mod clock;
pub mod commands;
pub mod expense_service;
pub mod mappers;
pub mod models;
pub mod validation;

pub use clock::{Clock, SystemClock};
pub use commands::{CreateExpenseCommand, UpdateExpenseCommand};
pub use expense_service::ExpenseService;
pub use validation::{validate_expense_payload, ValidationErrors};
