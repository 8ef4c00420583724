//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LensError;
use crate::models::{Transaction, TransactionId};

use super::file_io::{decode_records, read_json, write_json_atomic};

/// On-disk layout; records are kept raw so one bad entry can't sink the file
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    #[serde(default)]
    transactions: Vec<serde_json::Value>,
}

#[derive(serde::Serialize)]
struct TransactionDataOut<'a> {
    transactions: &'a [Transaction],
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), LensError> {
        let file_data: TransactionData = read_json(&self.path)?;
        let transactions: Vec<Transaction> = decode_records(file_data.transactions, "transaction");

        let mut data = self
            .data
            .write()
            .map_err(|e| LensError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for txn in transactions {
            data.insert(txn.id, txn);
        }
        tracing::debug!(count = data.len(), "loaded transactions");

        Ok(())
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> Result<(), LensError> {
        let transactions = self.get_all()?;
        write_json_atomic(
            &self.path,
            &TransactionDataOut {
                transactions: &transactions,
            },
        )
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, LensError> {
        let data = self
            .data
            .read()
            .map_err(|e| LensError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All transactions, newest first; undated ones go last
    pub fn get_all(&self) -> Result<Vec<Transaction>, LensError> {
        let data = self
            .data
            .read()
            .map_err(|e| LensError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(transactions)
    }

    /// Resolve a full or short ID to a single transaction
    pub fn find(&self, fragment: &str) -> Result<Option<Transaction>, LensError> {
        let data = self
            .data
            .read()
            .map_err(|e| LensError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut matches = data.values().filter(|t| t.id.matches(fragment));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(Some(txn.clone())),
            (None, _) => Ok(None),
            (Some(_), Some(_)) => Err(LensError::Validation(format!(
                "'{}' matches more than one transaction",
                fragment
            ))),
        }
    }

    pub fn upsert(&self, txn: Transaction) -> Result<(), LensError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LensError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(txn.id, txn);
        Ok(())
    }

    /// Remove a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, LensError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LensError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id))
    }

    pub fn count(&self) -> Result<usize, LensError> {
        let data = self
            .data
            .read()
            .map_err(|e| LensError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(y: i32, m: u32, d: u32, units: i64) -> Transaction {
        Transaction::expense(NaiveDate::from_ymd_opt(y, m, d).unwrap(), Money::from_units(units), "Food")
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_save_and_reload() {
        let (_temp_dir, repo) = create_test_repo();
        let older = expense(2024, 1, 5, 10);
        let newer = expense(2024, 3, 1, 20);
        let undated = Transaction::new(None, Money::from_units(5), None, false);

        repo.upsert(older.clone()).unwrap();
        repo.upsert(undated.clone()).unwrap();
        repo.upsert(newer.clone()).unwrap();
        repo.save().unwrap();

        repo.load().unwrap();
        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1].id, older.id);
        assert_eq!(all[2].id, undated.id);
        assert_eq!(repo.get(older.id).unwrap().unwrap().amount, Money::from_units(10));
    }

    #[test]
    fn test_bad_records_are_skipped_on_load() {
        let (temp_dir, repo) = create_test_repo();
        let good = expense(2024, 2, 2, 12);
        let json = serde_json::json!({
            "transactions": [
                serde_json::to_value(&good).unwrap(),
                {"id": "not-a-uuid", "amount": 5},
                {
                    "id": "7f1c8e56-1111-4c2b-9a77-3f0b2d9e0a11",
                    "date": "31/31/2024",
                    "amount": 700,
                    "category": "Food"
                }
            ]
        });
        std::fs::write(temp_dir.path().join("transactions.json"), json.to_string()).unwrap();

        repo.load().unwrap();
        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|t| t.id == good.id));
        assert!(all.iter().any(|t| t.date.is_none()));
    }

    #[test]
    fn test_find_and_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = expense(2024, 1, 1, 3);
        repo.upsert(txn.clone()).unwrap();

        let short = txn.id.to_string();
        assert_eq!(repo.find(&short).unwrap().unwrap().id, txn.id);
        assert!(repo.find("txn-zzzz").unwrap().is_none());

        assert!(repo.delete(txn.id).unwrap().is_some());
        assert!(repo.delete(txn.id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
