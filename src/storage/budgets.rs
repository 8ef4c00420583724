//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json. Creation goes through
//! `create_with` so the conflict check and the insert happen under one lock.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LensError;
use crate::models::{Budget, BudgetId, MonthKey};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), LensError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| LensError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.id, budget);
        }
        tracing::debug!(count = budgets.len(), "loaded budgets");

        Ok(())
    }

    /// Save budgets to disk, ordered by month then creation time
    pub fn save(&self) -> Result<(), LensError> {
        let budgets = self.get_all()?;
        write_json_atomic(&self.path, &BudgetData { budgets })
    }

    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, LensError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| LensError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&id).cloned())
    }

    pub fn get_all(&self) -> Result<Vec<Budget>, LensError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| LensError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| a.month.cmp(&b.month).then(a.created_at.cmp(&b.created_at)));
        Ok(list)
    }

    /// Budgets filed under `month`, oldest first
    pub fn get_for_month(&self, month: MonthKey) -> Result<Vec<Budget>, LensError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.month == month)
            .collect())
    }

    /// Resolve a full or short ID to a single budget
    pub fn find(&self, fragment: &str) -> Result<Option<Budget>, LensError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| LensError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut matches = budgets.values().filter(|b| b.id.matches(fragment));
        match (matches.next(), matches.next()) {
            (Some(budget), None) => Ok(Some(budget.clone())),
            (None, _) => Ok(None),
            (Some(_), Some(_)) => Err(LensError::Validation(format!(
                "'{}' matches more than one budget",
                fragment
            ))),
        }
    }

    /// Build a budget from the budgets already filed under `month` and
    /// insert it, all under the write lock
    pub fn create_with<F>(&self, month: MonthKey, build: F) -> Result<Budget, LensError>
    where
        F: FnOnce(&[Budget]) -> Result<Budget, LensError>,
    {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| LensError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let existing: Vec<Budget> = budgets.values().filter(|b| b.month == month).cloned().collect();
        let budget = build(&existing)?;
        budgets.insert(budget.id, budget.clone());
        Ok(budget)
    }

    pub fn upsert(&self, budget: Budget) -> Result<(), LensError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| LensError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.insert(budget.id, budget);
        Ok(())
    }

    /// Remove a budget, returning it if it existed
    pub fn delete(&self, id: BudgetId) -> Result<Option<Budget>, LensError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| LensError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(budgets.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");
        let repo = BudgetRepository::new(path);
        (temp_dir, repo)
    }

    fn budget(categories: &[&str], month: &str) -> Budget {
        Budget::from_input(categories, Money::from_units(100), month).unwrap()
    }

    #[test]
    fn test_save_and_reload() {
        let (_temp_dir, repo) = create_test_repo();
        let june = budget(&["Food"], "2024-06");
        let may = budget(&["Rent"], "2024-05");
        repo.upsert(june.clone()).unwrap();
        repo.upsert(may.clone()).unwrap();
        repo.save().unwrap();

        repo.load().unwrap();
        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, may.id);
        assert_eq!(repo.get(june.id).unwrap().unwrap().categories, june.categories);
    }

    #[test]
    fn test_get_for_month() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(budget(&["Food"], "2024-06")).unwrap();
        repo.upsert(budget(&["Rent"], "2024-06")).unwrap();
        repo.upsert(budget(&["Food"], "2024-07")).unwrap();

        let june = MonthKey::parse("2024-06").unwrap();
        assert_eq!(repo.get_for_month(june).unwrap().len(), 2);
        assert!(repo.get_for_month(june.prev()).unwrap().is_empty());
    }

    #[test]
    fn test_create_with_sees_only_that_month() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(budget(&["Food"], "2024-06")).unwrap();
        repo.upsert(budget(&["Food"], "2024-07")).unwrap();

        let june = MonthKey::parse("2024-06").unwrap();
        let created = repo
            .create_with(june, |existing| {
                assert_eq!(existing.len(), 1);
                Ok(budget(&["Rent"], "2024-06"))
            })
            .unwrap();
        assert!(repo.get(created.id).unwrap().is_some());

        let rejected = repo.create_with(june, |_| Err(LensError::EmptyCategories));
        assert!(rejected.is_err());
        assert_eq!(repo.get_for_month(june).unwrap().len(), 2);
    }

    #[test]
    fn test_find_and_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let b = budget(&["Food"], "2024-06");
        repo.upsert(b.clone()).unwrap();

        assert_eq!(repo.find(&b.id.to_string()).unwrap().unwrap().id, b.id);
        assert_eq!(repo.delete(b.id).unwrap().unwrap().id, b.id);
        assert!(repo.find(&b.id.to_string()).unwrap().is_none());
    }
}
