//! Budget analysis
//!
//! Compares one month's budgets with that month's expenses. A transaction
//! counts toward a budget when it is an expense, dated in the target month,
//! and its category is one of the budget's categories. Spend from every
//! member category is pooled against the budget's single cap.
//!
//! Also home to the creation-time conflict check: within one month a
//! category may belong to at most one budget.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::{LensError, LensResult};
use crate::models::{validate_budget_input, Budget, CategorySet, Money, MonthKey, Transaction};

/// Outcome of comparing one budget with its matched spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetAnalysisResult {
    pub budget: Budget,
    /// Sum of matched expense amounts
    pub spent: Money,
    /// `amount - spent`, negative when over budget
    pub remaining: Money,
    /// `raw_percentage` clamped to `[0, 100]` for progress bars
    pub percentage: f64,
    /// `spent / amount * 100` with no upper bound, `0` when amount is `0`
    pub raw_percentage: f64,
    /// `spent > amount`
    pub is_over_budget: bool,
    /// The expenses that made up `spent`
    pub transactions: Vec<Transaction>,
}

impl BudgetAnalysisResult {
    fn compute(budget: &Budget, matched: Vec<Transaction>) -> Self {
        let spent: Money = matched.iter().map(|t| t.amount).sum();
        let raw_percentage = spent.percent_of(budget.amount);
        Self {
            budget: budget.clone(),
            spent,
            remaining: budget.amount - spent,
            percentage: raw_percentage.clamp(0.0, 100.0),
            raw_percentage,
            is_over_budget: spent > budget.amount,
            transactions: matched,
        }
    }

    /// How far past the cap spending went, zero when within budget
    pub fn overspent_by(&self) -> Money {
        if self.is_over_budget {
            -self.remaining
        } else {
            Money::zero()
        }
    }
}

/// Runs budget comparisons for a single month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetAnalyzer {
    month: MonthKey,
}

impl BudgetAnalyzer {
    pub fn new(month: MonthKey) -> Self {
        Self { month }
    }

    pub fn month(&self) -> MonthKey {
        self.month
    }

    /// Whether `txn` counts toward `budget` in this analyzer's month
    pub fn matches(&self, budget: &Budget, txn: &Transaction) -> bool {
        txn.is_expense()
            && txn.date.is_some_and(|d| self.month.contains(d))
            && txn.category_key().is_some_and(|key| budget.covers(&key))
    }

    /// Analyze a single budget against a transaction snapshot
    pub fn analyze_budget(&self, budget: &Budget, transactions: &[Transaction]) -> BudgetAnalysisResult {
        let matched: Vec<Transaction> = transactions
            .iter()
            .filter(|t| self.matches(budget, t))
            .cloned()
            .collect();
        BudgetAnalysisResult::compute(budget, matched)
    }

    /// Analyze every budget of this month, in input order. Budgets filed
    /// under other months are skipped.
    pub fn analyze(&self, budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetAnalysisResult> {
        budgets
            .iter()
            .filter(|b| {
                let in_month = b.month == self.month;
                if !in_month {
                    tracing::debug!(budget = %b.id, budget_month = %b.month, month = %self.month, "skipping budget from another month");
                }
                in_month
            })
            .map(|b| self.analyze_budget(b, transactions))
            .collect()
    }

    /// Analyze and roll up the month in one pass
    pub fn overview(&self, budgets: &[Budget], transactions: &[Transaction]) -> BudgetOverview {
        let results = self.analyze(budgets, transactions);
        let in_month: Vec<&Budget> = budgets.iter().filter(|b| b.month == self.month).collect();
        let total_budget_cap: Money = in_month.iter().map(|b| b.amount).sum();
        let total_spent = self.spent_in_budgeted_categories(&in_month, transactions);
        BudgetOverview {
            month: self.month,
            results,
            total_budget_cap,
            total_spent_in_budgeted_categories: total_spent,
        }
    }

    /// Expenses of this month whose category has a budget. Each transaction
    /// counts once even if stored budgets overlap.
    fn spent_in_budgeted_categories(&self, budgets: &[&Budget], transactions: &[Transaction]) -> Money {
        let budgeted: BTreeSet<String> = budgets
            .iter()
            .flat_map(|b| b.categories.normalized())
            .collect();
        transactions
            .iter()
            .filter(|t| t.is_expense() && t.date.is_some_and(|d| self.month.contains(d)))
            .filter(|t| t.category_key().is_some_and(|key| budgeted.contains(&key)))
            .map(|t| t.amount)
            .sum()
    }
}

/// All budget results for one month plus their totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetOverview {
    pub month: MonthKey,
    pub results: Vec<BudgetAnalysisResult>,
    /// Sum of every budget's cap
    pub total_budget_cap: Money,
    /// Spend in categories that have a budget; unbudgeted spend is excluded
    pub total_spent_in_budgeted_categories: Money,
}

impl BudgetOverview {
    pub fn over_budget(&self) -> Vec<&BudgetAnalysisResult> {
        over_budget(&self.results)
    }

    pub fn total_remaining(&self) -> Money {
        self.total_budget_cap - self.total_spent_in_budgeted_categories
    }

    /// Pooled spend over pooled cap, `None` when there is no positive cap
    pub fn combined_percentage(&self) -> Option<f64> {
        if self.total_budget_cap.is_positive() {
            Some(self.total_spent_in_budgeted_categories.percent_of(self.total_budget_cap))
        } else {
            None
        }
    }
}

/// Analyze `budgets` against `transactions` for `month`
pub fn analyze_budgets(budgets: &[Budget], transactions: &[Transaction], month: MonthKey) -> Vec<BudgetAnalysisResult> {
    BudgetAnalyzer::new(month).analyze(budgets, transactions)
}

/// Sum of caps across `budgets`
pub fn total_budget_cap(budgets: &[Budget]) -> Money {
    budgets.iter().map(|b| b.amount).sum()
}

/// Results whose spending passed the cap
pub fn over_budget(results: &[BudgetAnalysisResult]) -> Vec<&BudgetAnalysisResult> {
    results.iter().filter(|r| r.is_over_budget).collect()
}

/// Every category already claimed by a budget in `month`
pub fn claimed_categories(existing: &[Budget], month: MonthKey) -> CategorySet {
    existing
        .iter()
        .filter(|b| b.month == month)
        .flat_map(|b| b.categories.iter())
        .collect()
}

/// Reject `candidate` if any of its categories is already budgeted in
/// `month`. The error lists exactly the overlapping categories.
pub fn check_category_conflicts(existing: &[Budget], month: MonthKey, candidate: &CategorySet) -> LensResult<()> {
    let claimed = claimed_categories(existing, month);
    let conflicts = candidate.intersection(&claimed);
    if conflicts.is_empty() {
        Ok(())
    } else {
        tracing::info!(month = %month, conflicts = ?conflicts, "budget rejected: categories already claimed");
        Err(LensError::CategoryConflict {
            month: month.to_string(),
            categories: conflicts,
        })
    }
}

/// Full creation check for a new budget: amount, categories and month shape
/// first, then conflicts against `existing`
pub fn validate_new_budget<S: AsRef<str>>(
    existing: &[Budget],
    categories: &[S],
    amount: Money,
    month: &str,
) -> LensResult<Budget> {
    let (categories, amount, month) = validate_budget_input(categories, amount, month)?;
    check_category_conflicts(existing, month, &categories)?;
    Ok(Budget::new(categories, amount, month))
}
