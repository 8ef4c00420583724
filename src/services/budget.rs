//! Budget service
//!
//! Budget lifecycle (create, change cap, delete) and month analysis.

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{LensError, LensResult};
use crate::models::{Budget, BudgetId, Money, MonthKey};
use crate::reports::{BudgetAnalysisResult, BudgetAnalyzer, BudgetOverview};
use crate::storage::TransactionStore;

/// Service for budget management
pub struct BudgetService<'a> {
    store: &'a dyn TransactionStore,
    audit: Option<&'a AuditLogger>,
}

impl<'a> BudgetService<'a> {
    pub fn new(store: &'a dyn TransactionStore) -> Self {
        Self { store, audit: None }
    }

    /// Record every mutation in `audit`
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

    /// Create a budget. Input is validated before anything is stored; a
    /// category already budgeted that month is a conflict.
    pub fn create(&self, categories: &[String], amount: Money, month: &str) -> LensResult<Budget> {
        let budget = self.store.create_budget(categories, amount, month)?;
        tracing::info!(budget = %budget.id, month = %budget.month, categories = %budget.label(), "created budget");

        self.record(AuditEntry::create(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.label()),
            &budget,
        ))?;
        Ok(budget)
    }

    /// Change a budget's cap
    pub fn update_amount(&self, id: BudgetId, amount: Money) -> LensResult<Budget> {
        let before = self
            .store
            .get_budget(id)?
            .ok_or_else(|| LensError::budget_not_found(id.to_string()))?;
        let after = self.store.update_budget(id, amount)?;
        tracing::info!(budget = %id, from = %before.amount, to = %after.amount, "updated budget cap");

        self.record(AuditEntry::update(
            EntityType::Budget,
            id.to_string(),
            Some(after.label()),
            &before,
            &after,
            Some(format!("amount: {} -> {}", before.amount, after.amount)),
        ))?;
        Ok(after)
    }

    pub fn delete(&self, id: BudgetId) -> LensResult<Budget> {
        let removed = self.store.delete_budget(id)?;
        tracing::info!(budget = %id, "deleted budget");

        self.record(AuditEntry::delete(
            EntityType::Budget,
            id.to_string(),
            Some(removed.label()),
            &removed,
        ))?;
        Ok(removed)
    }

    pub fn list(&self, month: MonthKey) -> LensResult<Vec<Budget>> {
        self.store.list_budgets(month)
    }

    /// Per-budget results for `month` from a fresh snapshot
    pub fn analyze(&self, month: MonthKey) -> LensResult<Vec<BudgetAnalysisResult>> {
        Ok(self.overview(month)?.results)
    }

    /// Results plus month totals from a fresh snapshot
    pub fn overview(&self, month: MonthKey) -> LensResult<BudgetOverview> {
        let budgets = self.store.list_budgets(month)?;
        let transactions = self.store.list_transactions()?;
        Ok(BudgetAnalyzer::new(month).overview(&budgets, &transactions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::LensPaths;
    use crate::models::Transaction;
    use crate::storage::Storage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, AuditLogger) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LensPaths::with_base_dir(temp_dir.path().to_path_buf());
        let audit = AuditLogger::new(paths.audit_log());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage, audit)
    }

    fn cats(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lifecycle_is_audited() {
        let (_temp_dir, storage, audit) = setup();
        let service = BudgetService::new(&storage).with_audit(&audit);

        let budget = service.create(&cats(&["Food"]), Money::from_units(100), "2024-06").unwrap();
        service.update_amount(budget.id, Money::from_units(150)).unwrap();
        service.delete(budget.id).unwrap();

        let entries = audit.read_all().unwrap();
        let ops: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(ops, [Operation::Create, Operation::Update, Operation::Delete]);
        assert_eq!(entries[1].summary.as_deref(), Some("amount: $100.00 -> $150.00"));
    }

    #[test]
    fn test_rejected_create_is_not_audited() {
        let (_temp_dir, storage, audit) = setup();
        let service = BudgetService::new(&storage).with_audit(&audit);

        service.create(&cats(&["Food"]), Money::from_units(100), "2024-06").unwrap();
        let err = service.create(&cats(&["food"]), Money::from_units(10), "2024-06").unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(audit.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_unknown_budget() {
        let (_temp_dir, storage, _audit) = setup();
        let err = BudgetService::new(&storage)
            .update_amount(BudgetId::new(), Money::from_units(1))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_overview_reads_current_snapshot() {
        let (_temp_dir, storage, _audit) = setup();
        let service = BudgetService::new(&storage);
        let june = MonthKey::parse("2024-06").unwrap();

        service.create(&cats(&["Food"]), Money::from_units(120), "2024-06").unwrap();
        assert_eq!(service.analyze(june).unwrap()[0].spent, Money::zero());

        storage
            .add_transaction(Transaction::expense(
                NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                Money::from_units(150),
                "Food",
            ))
            .unwrap();

        let overview = service.overview(june).unwrap();
        assert!(overview.results[0].is_over_budget);
        assert_eq!(overview.total_spent_in_budgeted_categories, Money::from_units(150));
    }
}
