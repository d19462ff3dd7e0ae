use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use csv::{Reader, Writer};
use rust_decimal::Decimal;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::str::FromStr;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::domain::models::Expense;
use crate::storage::traits::ExpenseStorage;

/// CSV-based expense repository
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    connection: CsvConnection,
}

impl ExpenseRepository {
    /// Create a new CSV expense repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all expenses from the CSV file
    fn read_expenses(&self) -> Result<Vec<Expense>> {
        self.connection.ensure_expenses_file_exists()?;

        let file_path = self.connection.expenses_file_path();
        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut expenses = Vec::new();

        for result in csv_reader.records() {
            let record = result?;

            let amount_field = record.get(2).unwrap_or("");
            let amount = Decimal::from_str(amount_field)
                .with_context(|| format!("Failed to parse expense amount '{}'", amount_field))?;

            let date_field = record.get(3).unwrap_or("");
            let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d")
                .with_context(|| format!("Failed to parse expense date '{}'", date_field))?;

            expenses.push(Expense {
                id: Some(record.get(0).unwrap_or("").to_string()),
                description: record.get(1).unwrap_or("").to_string(),
                amount,
                date,
                category: record.get(4).unwrap_or("").to_string(),
            });
        }

        debug!("Read {} expenses from {}", expenses.len(), file_path.display());
        Ok(expenses)
    }

    /// Write all expenses to the CSV file, replacing it atomically
    fn write_expenses(&self, expenses: &[Expense]) -> Result<()> {
        let file_path = self.connection.expenses_file_path();
        let temp_path = file_path.with_extension("tmp");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;

        let writer = BufWriter::new(file);
        let mut csv_writer = Writer::from_writer(writer);

        csv_writer.write_record(["id", "description", "amount", "date", "category"])?;

        for expense in expenses {
            let amount = expense.amount.to_string();
            let date = expense.date.format("%Y-%m-%d").to_string();
            csv_writer.write_record([
                expense.id.as_deref().unwrap_or(""),
                expense.description.as_str(),
                amount.as_str(),
                date.as_str(),
                expense.category.as_str(),
            ])?;
        }

        csv_writer.flush()?;
        drop(csv_writer);

        fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

impl ExpenseStorage for ExpenseRepository {
    fn find_all(&self) -> Result<Vec<Expense>> {
        self.read_expenses()
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Expense>> {
        let expenses = self.read_expenses()?;
        Ok(expenses.into_iter().find(|e| e.id.as_deref() == Some(id)))
    }

    fn save(&self, expense: &Expense) -> Result<Expense> {
        let mut expenses = self.read_expenses()?;

        let mut stored = expense.clone();
        match &stored.id {
            Some(id) => {
                if let Some(existing) =
                    expenses.iter_mut().find(|e| e.id.as_deref() == Some(id.as_str()))
                {
                    *existing = stored.clone();
                    info!("Updated expense {}", id);
                } else {
                    expenses.push(stored.clone());
                    info!("Stored expense {} with caller-assigned ID", id);
                }
            }
            None => {
                stored.id = Some(Expense::generate_id());
                expenses.push(stored.clone());
                info!(
                    "Stored new expense {}",
                    stored.id.as_deref().unwrap_or_default()
                );
            }
        }

        self.write_expenses(&expenses)?;
        Ok(stored)
    }

    fn exists_by_id(&self, id: &str) -> Result<bool> {
        let expenses = self.read_expenses()?;
        Ok(expenses.iter().any(|e| e.id.as_deref() == Some(id)))
    }

    fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut expenses = self.read_expenses()?;
        let before = expenses.len();
        expenses.retain(|e| e.id.as_deref() != Some(id));

        if expenses.len() < before {
            self.write_expenses(&expenses)?;
            info!("Deleted expense {}", id);
        } else {
            debug!("Delete of unknown expense {} was a no-op", id);
        }
        Ok(())
    }

    fn find_by_category(&self, category: &str) -> Result<Vec<Expense>> {
        let expenses = self.read_expenses()?;
        Ok(expenses
            .into_iter()
            .filter(|e| e.category == category)
            .collect())
    }

    fn find_by_date_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Expense>> {
        let expenses = self.read_expenses()?;
        Ok(expenses
            .into_iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect())
    }

    fn find_by_category_and_date_between(
        &self,
        category: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>> {
        let expenses = self.read_expenses()?;
        Ok(expenses
            .into_iter()
            .filter(|e| e.category == category && e.date >= start && e.date <= end)
            .collect())
    }

    fn find_by_month_and_year(&self, year: i32, month: u32) -> Result<Vec<Expense>> {
        let expenses = self.read_expenses()?;
        Ok(expenses
            .into_iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .collect())
    }

    fn find_amounts_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Decimal>> {
        let expenses = self.find_by_date_between(start, end)?;
        Ok(expenses.into_iter().map(|e| e.amount).collect())
    }

    fn find_amounts_by_category(&self, category: &str) -> Result<Vec<Decimal>> {
        let expenses = self.find_by_category(category)?;
        Ok(expenses.into_iter().map(|e| e.amount).collect())
    }

    fn find_expenses_for_monthly_summary(&self, year: i32) -> Result<Vec<Expense>> {
        let expenses = self.read_expenses()?;
        Ok(expenses
            .into_iter()
            .filter(|e| e.date.year() == year)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (ExpenseRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let repo = ExpenseRepository::new(connection);
        (repo, temp_dir)
    }

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn unsaved(description: &str, amount: &str, d: NaiveDate, category: &str) -> Expense {
        Expense {
            id: None,
            description: description.to_string(),
            amount: dec(amount),
            date: d,
            category: category.to_string(),
        }
    }

    #[test]
    fn save_assigns_id_and_round_trips() {
        let (repo, _temp_dir) = setup_test_repo();

        let stored = repo
            .save(&unsaved("Coffee", "3.50", date(2024, 5, 1), "Food"))
            .unwrap();
        let id = stored.id.clone().expect("save must assign an id");
        assert!(id.starts_with("expense::"));

        let fetched = repo.find_by_id(&id).unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.description, "Coffee");
        assert_eq!(fetched.amount, dec("3.50"));
        assert_eq!(fetched.date, date(2024, 5, 1));
        assert_eq!(fetched.category, "Food");
    }

    #[test]
    fn save_with_existing_id_overwrites() {
        let (repo, _temp_dir) = setup_test_repo();

        let mut stored = repo
            .save(&unsaved("Coffee", "3.50", date(2024, 5, 1), "Food"))
            .unwrap();
        stored.description = "Large coffee".to_string();
        stored.amount = dec("4.25");
        repo.save(&stored).unwrap();

        let all = repo.find_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, "Large coffee");
        assert_eq!(all[0].amount, dec("4.25"));
    }

    #[test]
    fn exists_and_delete() {
        let (repo, _temp_dir) = setup_test_repo();

        let stored = repo
            .save(&unsaved("Coffee", "3.50", date(2024, 5, 1), "Food"))
            .unwrap();
        let id = stored.id.unwrap();

        assert!(repo.exists_by_id(&id).unwrap());
        repo.delete_by_id(&id).unwrap();
        assert!(!repo.exists_by_id(&id).unwrap());
        assert!(repo.find_by_id(&id).unwrap().is_none());

        // Deleting again is a harmless no-op
        repo.delete_by_id(&id).unwrap();
        assert!(repo.find_all().unwrap().is_empty());
    }

    #[test]
    fn date_range_filter_is_inclusive() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.save(&unsaved("Before", "1.00", date(2024, 4, 30), "Misc"))
            .unwrap();
        repo.save(&unsaved("Start", "2.00", date(2024, 5, 1), "Misc"))
            .unwrap();
        repo.save(&unsaved("End", "3.00", date(2024, 5, 31), "Misc"))
            .unwrap();
        repo.save(&unsaved("After", "4.00", date(2024, 6, 1), "Misc"))
            .unwrap();

        let hits = repo
            .find_by_date_between(date(2024, 5, 1), date(2024, 5, 31))
            .unwrap();
        let mut descriptions: Vec<&str> =
            hits.iter().map(|e| e.description.as_str()).collect();
        descriptions.sort();
        assert_eq!(descriptions, vec!["End", "Start"]);
    }

    #[test]
    fn category_filters_are_exact() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.save(&unsaved("Coffee", "3.50", date(2024, 5, 1), "Food"))
            .unwrap();
        repo.save(&unsaved("Lunch", "12.00", date(2024, 5, 2), "Food"))
            .unwrap();
        repo.save(&unsaved("Bus", "2.75", date(2024, 5, 2), "Transport"))
            .unwrap();

        assert_eq!(repo.find_by_category("Food").unwrap().len(), 2);
        assert_eq!(repo.find_by_category("food").unwrap().len(), 0);

        let combined = repo
            .find_by_category_and_date_between("Food", date(2024, 5, 2), date(2024, 5, 2))
            .unwrap();
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].description, "Lunch");
    }

    #[test]
    fn month_and_year_filter() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.save(&unsaved("May this year", "1.00", date(2024, 5, 15), "Misc"))
            .unwrap();
        repo.save(&unsaved("May last year", "2.00", date(2023, 5, 15), "Misc"))
            .unwrap();
        repo.save(&unsaved("June this year", "3.00", date(2024, 6, 15), "Misc"))
            .unwrap();

        let hits = repo.find_by_month_and_year(2024, 5).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description, "May this year");
    }

    #[test]
    fn amount_fetches_preserve_exact_values() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.save(&unsaved("A", "0.10", date(2024, 5, 1), "Food"))
            .unwrap();
        repo.save(&unsaved("B", "0.20", date(2024, 5, 2), "Food"))
            .unwrap();

        let amounts = repo
            .find_amounts_by_date_between(date(2024, 5, 1), date(2024, 5, 31))
            .unwrap();
        let total: Decimal = amounts.into_iter().sum();
        assert_eq!(total, dec("0.30"));

        let by_category = repo.find_amounts_by_category("Food").unwrap();
        assert_eq!(by_category.len(), 2);
    }

    #[test]
    fn monthly_summary_fetch_is_scoped_to_year() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.save(&unsaved("This year", "1.00", date(2024, 3, 1), "Misc"))
            .unwrap();
        repo.save(&unsaved("Last year", "2.00", date(2023, 12, 31), "Misc"))
            .unwrap();

        let hits = repo.find_expenses_for_monthly_summary(2024).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description, "This year");
    }

    #[test]
    fn data_survives_repository_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let id = {
            let connection = CsvConnection::new(temp_dir.path()).unwrap();
            let repo = ExpenseRepository::new(connection);
            repo.save(&unsaved("Coffee", "3.50", date(2024, 5, 1), "Food"))
                .unwrap()
                .id
                .unwrap()
        };

        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let repo = ExpenseRepository::new(connection);
        let fetched = repo.find_by_id(&id).unwrap().unwrap();
        assert_eq!(fetched.description, "Coffee");
        assert_eq!(fetched.amount, dec("3.50"));
    }

    #[test]
    fn descriptions_with_commas_and_quotes_round_trip() {
        let (repo, _temp_dir) = setup_test_repo();

        let stored = repo
            .save(&unsaved(
                "Dinner, wine and \"dessert\"",
                "42.00",
                date(2024, 5, 1),
                "Food, drink",
            ))
            .unwrap();

        let fetched = repo.find_by_id(stored.id.as_deref().unwrap()).unwrap().unwrap();
        assert_eq!(fetched.description, "Dinner, wine and \"dessert\"");
        assert_eq!(fetched.category, "Food, drink");
    }
}
