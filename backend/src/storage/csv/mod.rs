//! # CSV Storage Module
//!
//! File-based storage backend for the expense tracker. All expenses live in
//! a single `expenses.csv` file under the connection's base directory, and
//! every write replaces the file atomically (temp file + rename).
//!
//! ## File Format
//!
//! ```csv
//! id,description,amount,date,category
//! expense::6f9619ff-8b86-4d11-b42d-00c04fc964ff,Coffee,3.50,2024-05-01,Food
//! expense::16fd2706-8baf-433b-82eb-8c7fada847da,Bus ticket,2.75,2024-05-02,Transport
//! ```
//!
//! Filtering and aggregation happen in memory after a full file scan; the
//! domain layer's reduce-based totals rely on the raw amount fetches this
//! backend provides.

pub mod connection;
pub mod expense_repository;

pub use connection::CsvConnection;
pub use expense_repository::ExpenseRepository;
