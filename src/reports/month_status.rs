//! Month status classification for the calendar grid
//!
//! Each month of a year gets one status from the pooled spend of all its
//! budgets against their pooled cap. One badly overspent category can tip a
//! month into `Exceeded` even when the others are healthy.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::budget_analysis::BudgetAnalyzer;
use crate::models::{Budget, Money, MonthKey, Transaction};

/// Default combined percentage at which a month turns to `Warning`
pub const DEFAULT_WARNING_THRESHOLD: f64 = 80.0;

/// Combined percentage above which a month is `Exceeded`
pub const EXCEEDED_THRESHOLD: f64 = 100.0;

/// Budget health of one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthStatus {
    /// No budgets (or no usable cap) that month
    #[default]
    None,
    Ok,
    Warning,
    Exceeded,
}

impl MonthStatus {
    /// Classify a combined percentage against `warning_threshold`
    pub fn from_percentage(percentage: f64, warning_threshold: f64) -> Self {
        if !percentage.is_finite() {
            return Self::None;
        }
        if percentage > EXCEEDED_THRESHOLD {
            Self::Exceeded
        } else if percentage >= warning_threshold {
            Self::Warning
        } else {
            Self::Ok
        }
    }
}

impl fmt::Display for MonthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Exceeded => "exceeded",
        };
        f.pad(label)
    }
}

/// One cell of the calendar grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCell {
    pub month: MonthKey,
    pub status: MonthStatus,
    /// Pooled spend over pooled cap, `None` when the month has no cap
    pub combined_percentage: Option<f64>,
    pub total_budget_cap: Money,
    pub total_spent: Money,
    pub budget_count: usize,
}

impl MonthCell {
    fn empty(month: MonthKey) -> Self {
        Self {
            month,
            status: MonthStatus::None,
            combined_percentage: None,
            total_budget_cap: Money::zero(),
            total_spent: Money::zero(),
            budget_count: 0,
        }
    }
}

/// Classifies months from their budgets and expenses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyStatusClassifier {
    warning_threshold: f64,
}

impl Default for MonthlyStatusClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_WARNING_THRESHOLD)
    }
}

impl MonthlyStatusClassifier {
    /// A classifier that warns from `warning_threshold` percent. Values
    /// outside `0..=100` fall back to the default.
    pub fn new(warning_threshold: f64) -> Self {
        let warning_threshold = if (0.0..=EXCEEDED_THRESHOLD).contains(&warning_threshold) {
            warning_threshold
        } else {
            tracing::warn!(warning_threshold, "warning threshold out of range, using default");
            DEFAULT_WARNING_THRESHOLD
        };
        Self { warning_threshold }
    }

    pub fn warning_threshold(&self) -> f64 {
        self.warning_threshold
    }

    /// Classify one month in detail
    pub fn classify_cell(&self, month: MonthKey, budgets: &[Budget], transactions: &[Transaction]) -> MonthCell {
        let overview = BudgetAnalyzer::new(month).overview(budgets, transactions);
        let mut cell = MonthCell::empty(month);
        cell.budget_count = overview.results.len();
        cell.total_budget_cap = overview.total_budget_cap;
        cell.total_spent = overview.total_spent_in_budgeted_categories;

        if let Some(percentage) = overview.combined_percentage() {
            cell.combined_percentage = Some(percentage);
            cell.status = MonthStatus::from_percentage(percentage, self.warning_threshold);
        }
        cell
    }

    pub fn classify_month(&self, month: MonthKey, budgets: &[Budget], transactions: &[Transaction]) -> MonthStatus {
        self.classify_cell(month, budgets, transactions).status
    }

    /// All twelve cells of `year`. Maps are keyed by month number (1-12);
    /// a month missing from `budgets_by_month` is `None`, a month missing
    /// from `transactions_by_month` has no spending.
    pub fn classify_year_cells(
        &self,
        year: i32,
        budgets_by_month: &HashMap<u32, Vec<Budget>>,
        transactions_by_month: &HashMap<u32, Vec<Transaction>>,
    ) -> Vec<MonthCell> {
        MonthKey::months_of_year(year)
            .map(|month| match budgets_by_month.get(&month.month()) {
                Some(budgets) if !budgets.is_empty() => {
                    let transactions = transactions_by_month
                        .get(&month.month())
                        .map(Vec::as_slice)
                        .unwrap_or(&[]);
                    self.classify_cell(month, budgets, transactions)
                }
                _ => MonthCell::empty(month),
            })
            .collect()
    }

    /// Status for each month (1-12) of `year`
    pub fn classify_year(
        &self,
        year: i32,
        budgets_by_month: &HashMap<u32, Vec<Budget>>,
        transactions_by_month: &HashMap<u32, Vec<Transaction>>,
    ) -> BTreeMap<u32, MonthStatus> {
        self.classify_year_cells(year, budgets_by_month, transactions_by_month)
            .into_iter()
            .map(|cell| (cell.month.month(), cell.status))
            .collect()
    }
}

/// Classify every month of `year` with the default threshold
pub fn classify_year(
    year: i32,
    budgets_by_month: &HashMap<u32, Vec<Budget>>,
    transactions_by_month: &HashMap<u32, Vec<Transaction>>,
) -> BTreeMap<u32, MonthStatus> {
    MonthlyStatusClassifier::default().classify_year(year, budgets_by_month, transactions_by_month)
}

/// Split `transactions` dated in `year` by month number. Undated
/// transactions and other years are left out.
pub fn group_by_month(transactions: &[Transaction], year: i32) -> HashMap<u32, Vec<Transaction>> {
    let mut grouped: HashMap<u32, Vec<Transaction>> = HashMap::new();
    for txn in transactions {
        if let Some(key) = txn.month_key().filter(|k| k.year() == year) {
            grouped.entry(key.month()).or_default().push(txn.clone());
        }
    }
    grouped
}
