use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::Connection;

const EXPENSES_FILE: &str = "expenses.csv";
const EXPENSES_HEADER: &str = "id,description,amount,date,category\n";

/// CsvConnection manages file paths and ensures the expenses CSV file
/// exists under the base directory.
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the file path for the expenses CSV file
    pub fn expenses_file_path(&self) -> PathBuf {
        self.base_directory.join(EXPENSES_FILE)
    }

    /// Ensure the expenses CSV file exists with its header
    pub fn ensure_expenses_file_exists(&self) -> Result<()> {
        let file_path = self.expenses_file_path();

        if !file_path.exists() {
            fs::write(&file_path, EXPENSES_HEADER)?;
        }

        Ok(())
    }
}

impl Connection for CsvConnection {
    type ExpenseRepository = super::expense_repository::ExpenseRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        super::expense_repository::ExpenseRepository::new(self.clone())
    }
}
