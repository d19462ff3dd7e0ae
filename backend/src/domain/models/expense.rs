//! Domain model for an expense record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single monetary spending record.
///
/// `id` is `None` until the record is first persisted; the store assigns an
/// opaque identifier on save and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
}

impl Expense {
    /// Generate a unique expense ID.
    /// Format: expense::<uuid>
    /// Example: expense::6f9619ff-8b86-4d11-b42d-00c04fc964ff
    pub fn generate_id() -> String {
        format!("expense::{}", Uuid::new_v4())
    }
}
