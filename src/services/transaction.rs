//! Transaction service
//!
//! Recording and removing transactions, and listing them through a time
//! window.

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::LensResult;
use crate::models::{normalize_category, Transaction};
use crate::reports::{TimeWindow, TimeWindowFilter};
use crate::storage::{Storage, TransactionStore};

/// Options for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub window: TimeWindow,
    /// Only this category (compared normalized)
    pub category: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    audit: Option<&'a AuditLogger>,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            audit: None,
        }
    }

    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    fn record(&self, entry: AuditEntry) -> LensResult<()> {
        match self.audit {
            Some(logger) => logger.log(&entry),
            None => Ok(()),
        }
    }

    /// Validate, store and audit a transaction
    pub fn add(&self, txn: Transaction) -> LensResult<Transaction> {
        let txn = self.storage.add_transaction(txn)?;
        tracing::info!(transaction = %txn.id, amount = %txn.amount, income = txn.is_income, "recorded transaction");

        self.record(AuditEntry::create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.category_label().to_string()),
            &txn,
        ))?;
        Ok(txn)
    }

    /// Delete by full or short ID
    pub fn delete(&self, fragment: &str) -> LensResult<Transaction> {
        let txn = self.storage.find_transaction(fragment)?;
        let removed = self.storage.delete_transaction(txn.id)?;
        tracing::info!(transaction = %removed.id, "deleted transaction");

        self.record(AuditEntry::delete(
            EntityType::Transaction,
            removed.id.to_string(),
            Some(removed.category_label().to_string()),
            &removed,
        ))?;
        Ok(removed)
    }

    /// Transactions matching `filter`, newest first
    pub fn list(&self, filter: &TransactionFilter, current_year: i32) -> LensResult<Vec<Transaction>> {
        let all = self.storage.list_transactions()?;
        let mut transactions = TimeWindowFilter::new(current_year).filter(&all, filter.window);

        if let Some(category) = &filter.category {
            let wanted = normalize_category(category);
            transactions.retain(|t| t.category_key().as_deref() == Some(wanted.as_str()));
        }
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::LensPaths;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, AuditLogger) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LensPaths::with_base_dir(temp_dir.path().to_path_buf());
        let audit = AuditLogger::new(paths.audit_log());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage, audit)
    }

    fn expense(y: i32, m: u32, units: i64, category: &str) -> Transaction {
        Transaction::expense(NaiveDate::from_ymd_opt(y, m, 1).unwrap(), Money::from_units(units), category)
    }

    #[test]
    fn test_add_and_delete_are_audited() {
        let (_temp_dir, storage, audit) = setup();
        let service = TransactionService::new(&storage).with_audit(&audit);

        let txn = service.add(expense(2024, 1, 10, "Food")).unwrap();
        let removed = service.delete(&txn.id.to_string()).unwrap();
        assert_eq!(removed.id, txn.id);

        let ops: Vec<_> = audit.read_all().unwrap().iter().map(|e| e.operation).collect();
        assert_eq!(ops, [Operation::Create, Operation::Delete]);
        assert!(service.delete(&txn.id.to_string()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_with_filter() {
        let (_temp_dir, storage, _audit) = setup();
        let service = TransactionService::new(&storage);
        service.add(expense(2024, 1, 10, "Food")).unwrap();
        service.add(expense(2024, 2, 20, "Rent")).unwrap();
        service.add(expense(2024, 3, 30, "food")).unwrap();
        service.add(expense(2022, 3, 40, "Food")).unwrap();

        let current = TransactionFilter::new().window(TimeWindow::Current);
        assert_eq!(service.list(&current, 2024).unwrap().len(), 3);

        let food = current.clone().category("FOOD").limit(1);
        let listed = service.list(&food, 2024).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, Money::from_units(30));

        let previous = TransactionFilter::new().window(TimeWindow::Previous { year: None });
        assert_eq!(service.list(&previous, 2024).unwrap().len(), 1);
    }
}
