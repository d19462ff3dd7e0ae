pub mod expense;

pub use expense::{CreateExpenseCommand, UpdateExpenseCommand};
