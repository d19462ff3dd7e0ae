//! Storage layer: the abstract expense store contract and its concrete
//! backends.

pub mod csv;
pub mod traits;

pub use csv::CsvConnection;
pub use traits::{Connection, ExpenseStorage};
