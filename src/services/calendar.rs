//! Calendar service
//!
//! Builds the twelve-month status grid for a year. Each month's budgets are
//! fetched on its own thread; results are collected by month number so the
//! order in which fetches finish doesn't matter. A month whose fetch fails is
//! logged and shown as having no budgets.

use serde::Serialize;
use std::collections::HashMap;
use std::thread;

use crate::error::LensResult;
use crate::models::{Budget, MonthKey};
use crate::reports::{group_by_month, MonthCell, MonthStatus, MonthlyStatusClassifier};
use crate::storage::TransactionStore;

/// Status grid for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCalendar {
    pub year: i32,
    /// Always twelve cells, January first
    pub cells: Vec<MonthCell>,
}

impl YearCalendar {
    /// Status of `month` (1-12)
    pub fn status(&self, month: u32) -> MonthStatus {
        self.cells
            .iter()
            .find(|c| c.month.month() == month)
            .map(|c| c.status)
            .unwrap_or_default()
    }
}

pub struct CalendarService<'a> {
    store: &'a dyn TransactionStore,
    classifier: MonthlyStatusClassifier,
}

impl<'a> CalendarService<'a> {
    pub fn new(store: &'a dyn TransactionStore) -> Self {
        Self {
            store,
            classifier: MonthlyStatusClassifier::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: MonthlyStatusClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Classify every month of `year`. A failure to list transactions is
    /// returned; a failure for a single month's budgets only blanks that month.
    pub fn year_status(&self, year: i32) -> LensResult<YearCalendar> {
        let transactions = self.store.list_transactions()?;
        let budgets_by_month = self.fetch_year_budgets(year);
        let transactions_by_month = group_by_month(&transactions, year);

        let cells = self
            .classifier
            .classify_year_cells(year, &budgets_by_month, &transactions_by_month);
        Ok(YearCalendar { year, cells })
    }

    fn fetch_year_budgets(&self, year: i32) -> HashMap<u32, Vec<Budget>> {
        let store = self.store;
        thread::scope(|scope| {
            let handles: Vec<_> = MonthKey::months_of_year(year)
                .map(|month| (month, scope.spawn(move || store.list_budgets(month))))
                .collect();

            let mut by_month = HashMap::new();
            for (month, handle) in handles {
                match handle.join() {
                    Ok(Ok(budgets)) => {
                        by_month.insert(month.month(), budgets);
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(month = %month, error = %e, "failed to load budgets, month left blank");
                    }
                    Err(_) => {
                        tracing::warn!(month = %month, "budget fetch panicked, month left blank");
                    }
                }
            }
            by_month
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LensError;
    use crate::models::{BudgetId, Money, Transaction};
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory store whose month fetches finish in reverse order and can fail
    struct FakeStore {
        budgets: Vec<Budget>,
        transactions: Vec<Transaction>,
        failing_month: Option<u32>,
        finished: Mutex<Vec<u32>>,
    }

    impl FakeStore {
        fn new(budgets: Vec<Budget>, transactions: Vec<Transaction>) -> Self {
            Self {
                budgets,
                transactions,
                failing_month: None,
                finished: Mutex::new(Vec::new()),
            }
        }
    }

    impl TransactionStore for FakeStore {
        fn list_transactions(&self) -> LensResult<Vec<Transaction>> {
            Ok(self.transactions.clone())
        }

        fn list_budgets(&self, month: MonthKey) -> LensResult<Vec<Budget>> {
            thread::sleep(Duration::from_millis(5 * (12 - month.month() as u64)));
            self.finished.lock().unwrap().push(month.month());
            if self.failing_month == Some(month.month()) {
                return Err(LensError::Storage("store unreachable".into()));
            }
            Ok(self.budgets.iter().filter(|b| b.month == month).cloned().collect())
        }

        fn get_budget(&self, id: BudgetId) -> LensResult<Option<Budget>> {
            Ok(self.budgets.iter().find(|b| b.id == id).cloned())
        }

        fn create_budget(&self, _: &[String], _: Money, _: &str) -> LensResult<Budget> {
            Err(LensError::Storage("read-only".into()))
        }

        fn update_budget(&self, id: BudgetId, _: Money) -> LensResult<Budget> {
            Err(LensError::budget_not_found(id.to_string()))
        }

        fn delete_budget(&self, id: BudgetId) -> LensResult<Budget> {
            Err(LensError::budget_not_found(id.to_string()))
        }
    }

    fn budget(categories: &[&str], units: i64, month: &str) -> Budget {
        Budget::from_input(categories, Money::from_units(units), month).unwrap()
    }

    fn expense(m: u32, units: i64, category: &str) -> Transaction {
        Transaction::expense(NaiveDate::from_ymd_opt(2024, m, 10).unwrap(), Money::from_units(units), category)
    }

    fn sample_store() -> FakeStore {
        FakeStore::new(
            vec![
                budget(&["Food"], 100, "2024-01"),
                budget(&["Food"], 100, "2024-02"),
                budget(&["Food"], 100, "2024-03"),
            ],
            vec![expense(1, 50, "Food"), expense(2, 85, "Food"), expense(3, 130, "Food")],
        )
    }

    #[test]
    fn test_year_status_regardless_of_arrival_order() {
        let store = sample_store();
        let calendar = CalendarService::new(&store).year_status(2024).unwrap();

        assert_eq!(calendar.cells.len(), 12);
        assert_eq!(calendar.status(1), MonthStatus::Ok);
        assert_eq!(calendar.status(2), MonthStatus::Warning);
        assert_eq!(calendar.status(3), MonthStatus::Exceeded);
        assert_eq!(calendar.status(4), MonthStatus::None);

        let finished = store.finished.lock().unwrap();
        assert_eq!(finished.len(), 12);
    }

    #[test]
    fn test_failed_month_degrades_to_none() {
        let mut store = sample_store();
        store.failing_month = Some(2);
        let calendar = CalendarService::new(&store).year_status(2024).unwrap();

        assert_eq!(calendar.status(1), MonthStatus::Ok);
        assert_eq!(calendar.status(2), MonthStatus::None);
        assert_eq!(calendar.status(3), MonthStatus::Exceeded);
    }

    #[test]
    fn test_custom_threshold() {
        let store = sample_store();
        let calendar = CalendarService::new(&store)
            .with_classifier(MonthlyStatusClassifier::new(40.0))
            .year_status(2024)
            .unwrap();
        assert_eq!(calendar.status(1), MonthStatus::Warning);
    }

    #[test]
    fn test_other_year_is_blank() {
        let store = sample_store();
        let calendar = CalendarService::new(&store).year_status(2023).unwrap();
        assert!(calendar.cells.iter().all(|c| c.status == MonthStatus::None));
    }
}
