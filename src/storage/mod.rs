//! Storage layer for BudgetLens
//!
//! The reports engine only reads snapshots; everything it needs from the
//! outside world goes through [`TransactionStore`]. [`Storage`] is the JSON
//! file implementation used by the CLI.

pub mod budgets;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use transactions::TransactionRepository;

use crate::config::paths::LensPaths;
use crate::error::{LensError, LensResult};
use crate::models::{validate_budget_input, Budget, BudgetId, Money, MonthKey, Transaction, TransactionId};
use crate::reports::validate_new_budget;

/// Persistence collaborator for transactions and budgets
///
/// `Send + Sync` so month fetches can run on several threads at once.
pub trait TransactionStore: Send + Sync {
    /// Every stored transaction
    fn list_transactions(&self) -> LensResult<Vec<Transaction>>;

    /// Budgets filed under `month`
    fn list_budgets(&self, month: MonthKey) -> LensResult<Vec<Budget>>;

    /// A single budget by ID
    fn get_budget(&self, id: BudgetId) -> LensResult<Option<Budget>>;

    /// Validate and insert a new budget. Fails with a conflict error when a
    /// category is already budgeted for that month.
    fn create_budget(&self, categories: &[String], amount: Money, month_key: &str) -> LensResult<Budget>;

    /// Change a budget's cap
    fn update_budget(&self, id: BudgetId, amount: Money) -> LensResult<Budget>;

    /// Remove a budget, returning what was removed
    fn delete_budget(&self, id: BudgetId) -> LensResult<Budget>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LensPaths,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance; call [`Storage::load_all`] to read data
    pub fn new(paths: LensPaths) -> Result<Self, LensError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            paths,
        })
    }

    /// Create and load in one step
    pub fn open(paths: LensPaths) -> Result<Self, LensError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &LensPaths {
        &self.paths
    }

    pub fn load_all(&self) -> Result<(), LensError> {
        self.transactions.load()?;
        self.budgets.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), LensError> {
        self.transactions.save()?;
        self.budgets.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a transaction and persist it
    pub fn add_transaction(&self, txn: Transaction) -> LensResult<Transaction> {
        txn.validate()
            .map_err(|e| LensError::Validation(e.to_string()))?;
        self.transactions.upsert(txn.clone())?;
        self.transactions.save()?;
        tracing::debug!(transaction = %txn.id, "added transaction");
        Ok(txn)
    }

    /// Remove a transaction and persist the change
    pub fn delete_transaction(&self, id: TransactionId) -> LensResult<Transaction> {
        let removed = self
            .transactions
            .delete(id)?
            .ok_or_else(|| LensError::transaction_not_found(id.to_string()))?;
        self.transactions.save()?;
        Ok(removed)
    }

    /// Resolve a user-supplied transaction ID
    pub fn find_transaction(&self, fragment: &str) -> LensResult<Transaction> {
        self.transactions
            .find(fragment)?
            .ok_or_else(|| LensError::transaction_not_found(fragment))
    }

    /// Resolve a user-supplied budget ID
    pub fn find_budget(&self, fragment: &str) -> LensResult<Budget> {
        self.budgets
            .find(fragment)?
            .ok_or_else(|| LensError::budget_not_found(fragment))
    }

    /// Every budget across all months
    pub fn list_all_budgets(&self) -> LensResult<Vec<Budget>> {
        self.budgets.get_all()
    }
}

impl TransactionStore for Storage {
    fn list_transactions(&self) -> LensResult<Vec<Transaction>> {
        self.transactions.get_all()
    }

    fn list_budgets(&self, month: MonthKey) -> LensResult<Vec<Budget>> {
        self.budgets.get_for_month(month)
    }

    fn get_budget(&self, id: BudgetId) -> LensResult<Option<Budget>> {
        self.budgets.get(id)
    }

    fn create_budget(&self, categories: &[String], amount: Money, month_key: &str) -> LensResult<Budget> {
        let (_, _, month) = validate_budget_input(categories, amount, month_key)?;
        let budget = self
            .budgets
            .create_with(month, |existing| validate_new_budget(existing, categories, amount, month_key))?;
        self.budgets.save()?;
        Ok(budget)
    }

    fn update_budget(&self, id: BudgetId, amount: Money) -> LensResult<Budget> {
        let mut budget = self
            .budgets
            .get(id)?
            .ok_or_else(|| LensError::budget_not_found(id.to_string()))?;
        budget.set_amount(amount)?;
        self.budgets.upsert(budget.clone())?;
        self.budgets.save()?;
        Ok(budget)
    }

    fn delete_budget(&self, id: BudgetId) -> LensResult<Budget> {
        let removed = self
            .budgets
            .delete(id)?
            .ok_or_else(|| LensError::budget_not_found(id.to_string()))?;
        self.budgets.save()?;
        Ok(removed)
    }
}
