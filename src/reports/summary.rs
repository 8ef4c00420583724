//! Headline numbers for dashboard cards
//!
//! Works on an already-filtered transaction list and ignores budgets.
//! Both sign conventions for the net figure are produced; which one is shown
//! is always the caller's explicit choice.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::models::{normalize_category, Money, MonthKey, Transaction};

/// Which sign the headline net figure uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceConvention {
    /// Expenses minus incomes: positive means money went out
    #[default]
    NetSpend,
    /// Incomes minus expenses: positive means money was saved
    Surplus,
}

impl fmt::Display for BalanceConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetSpend => write!(f, "net spend"),
            Self::Surplus => write!(f, "surplus"),
        }
    }
}

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// Display name (first spelling seen)
    pub category: String,
    pub total: Money,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationSummary {
    pub transaction_count: usize,
    pub expense_count: usize,
    pub income_count: usize,
    pub total_expenses: Money,
    pub total_incomes: Money,
    /// `total_expenses - total_incomes`
    pub net_total: Money,
    /// `total_incomes - total_expenses`
    pub balance: Money,
    /// Category with the largest expense total; ties go to the category seen first
    pub top_category: Option<CategoryTotal>,
    /// `total_expenses / expense_count`, zero when there are no expenses
    pub average_expense: Money,
    /// Expense totals per category, largest first, ties in first-seen order
    pub by_category: Vec<CategoryTotal>,
}

impl AggregationSummary {
    /// The net figure under `convention`
    pub fn headline_total(&self, convention: BalanceConvention) -> Money {
        match convention {
            BalanceConvention::NetSpend => self.net_total,
            BalanceConvention::Surplus => self.balance,
        }
    }

    /// Share of total expenses spent in `category_total`
    pub fn share_of_expenses(&self, category_total: &CategoryTotal) -> f64 {
        category_total.total.percent_of(self.total_expenses)
    }
}

/// Roll up `transactions` into headline numbers
pub fn summarize(transactions: &[Transaction]) -> AggregationSummary {
    let mut summary = AggregationSummary {
        transaction_count: transactions.len(),
        ..AggregationSummary::default()
    };

    // first-seen order of categories, keyed by normalized name
    let mut order: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for txn in transactions {
        if txn.is_income {
            summary.income_count += 1;
            summary.total_incomes += txn.amount;
            continue;
        }

        summary.expense_count += 1;
        summary.total_expenses += txn.amount;

        let label = txn.category_label();
        let slot = *index.entry(normalize_category(label)).or_insert_with(|| {
            order.push(CategoryTotal {
                category: label.to_string(),
                total: Money::zero(),
                count: 0,
            });
            order.len() - 1
        });
        order[slot].total += txn.amount;
        order[slot].count += 1;
    }

    summary.net_total = summary.total_expenses - summary.total_incomes;
    summary.balance = summary.total_incomes - summary.total_expenses;
    summary.average_expense = summary.total_expenses.split_evenly(summary.expense_count);

    let mut top: Option<&CategoryTotal> = None;
    for candidate in &order {
        if top.map_or(true, |best| candidate.total > best.total) {
            top = Some(candidate);
        }
    }
    summary.top_category = top.cloned();

    // stable sort keeps first-seen order among equal totals
    order.sort_by(|a, b| b.total.cmp(&a.total));
    summary.by_category = order;
    summary
}

/// `(current - previous) / previous * 100`, or `0` without a positive baseline
pub fn change_percent(current: Money, previous: Money) -> f64 {
    if previous.is_positive() {
        (current - previous).percent_of(previous)
    } else {
        0.0
    }
}

/// Expense totals of a month and the month before it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyChange {
    pub month: MonthKey,
    pub current_month_total: Money,
    pub previous_month_total: Money,
    pub change_percent: f64,
}

/// Compare expenses in `month` with the preceding month
pub fn monthly_change(transactions: &[Transaction], month: MonthKey) -> MonthlyChange {
    let previous = month.prev();
    let expenses_in = |key: MonthKey| -> Money {
        transactions
            .iter()
            .filter(|t| t.is_expense() && t.month_key() == Some(key))
            .map(|t| t.amount)
            .sum()
    };
    let current_month_total = expenses_in(month);
    let previous_month_total = expenses_in(previous);
    MonthlyChange {
        month,
        current_month_total,
        previous_month_total,
        change_percent: change_percent(current_month_total, previous_month_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.transaction_count, 0);
        assert_eq!(summary.total_expenses, Money::zero());
        assert_eq!(summary.total_incomes, Money::zero());
        assert_eq!(summary.net_total, Money::zero());
        assert_eq!(summary.balance, Money::zero());
        assert_eq!(summary.average_expense, Money::zero());
        assert!(summary.top_category.is_none());
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn test_totals_and_both_signs() {
        let txns = vec![
            Transaction::expense(day(1, 1), Money::from_units(30), "Food"),
            Transaction::expense(day(1, 2), Money::from_units(20), "Transport"),
            Transaction::income(day(1, 3), Money::from_units(100), Some("Salary".into())),
        ];
        let summary = summarize(&txns);
        assert_eq!(summary.total_expenses, Money::from_units(50));
        assert_eq!(summary.total_incomes, Money::from_units(100));
        assert_eq!(summary.net_total, Money::from_units(-50));
        assert_eq!(summary.balance, Money::from_units(50));
        assert_eq!(summary.headline_total(BalanceConvention::NetSpend), Money::from_units(-50));
        assert_eq!(summary.headline_total(BalanceConvention::Surplus), Money::from_units(50));
        assert_eq!(summary.average_expense, Money::from_units(25));
        assert_eq!(summary.expense_count, 2);
        assert_eq!(summary.income_count, 1);
    }

    #[test]
    fn test_top_category_tie_goes_to_first_seen() {
        let txns = vec![
            Transaction::expense(day(1, 1), Money::from_units(10), "Transport"),
            Transaction::expense(day(1, 2), Money::from_units(5), "Food"),
            Transaction::expense(day(1, 3), Money::from_units(5), "food"),
        ];
        let summary = summarize(&txns);
        let top = summary.top_category.as_ref().unwrap();
        assert_eq!(top.category, "Transport");
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.by_category[1].category, "Food");
        assert_eq!(summary.by_category[1].count, 2);
        assert_eq!(summary.share_of_expenses(top), 50.0);
    }

    #[test]
    fn test_missing_category_is_unknown() {
        let txns = vec![Transaction::new(Some(day(1, 1)), Money::from_units(3), None, false)];
        let summary = summarize(&txns);
        assert_eq!(summary.top_category.unwrap().category, "unknown");
    }

    #[test]
    fn test_incomes_never_top_category() {
        let txns = vec![Transaction::income(day(1, 1), Money::from_units(1000), Some("Salary".into()))];
        assert!(summarize(&txns).top_category.is_none());
    }

    #[test]
    fn test_out_of_range_amounts_do_not_overflow() {
        let txns = vec![
            Transaction::expense(day(1, 1), Money::from_cents(i64::MAX), "Food"),
            Transaction::expense(day(1, 2), Money::from_cents(1), "Food"),
            Transaction::income(day(1, 3), Money::from_cents(i64::MAX), None),
        ];
        let summary = summarize(&txns);
        assert_eq!(summary.total_expenses, Money::from_cents(i64::MAX));
        assert_eq!(summary.net_total, Money::zero());
        assert_eq!(summary.by_category[0].total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_change_percent() {
        assert_eq!(change_percent(Money::from_units(150), Money::from_units(100)), 50.0);
        assert_eq!(change_percent(Money::from_units(50), Money::from_units(100)), -50.0);
        assert_eq!(change_percent(Money::from_units(50), Money::zero()), 0.0);
    }

    #[test]
    fn test_monthly_change() {
        let txns = vec![
            Transaction::expense(day(5, 10), Money::from_units(200), "Food"),
            Transaction::expense(day(6, 10), Money::from_units(100), "Food"),
            Transaction::expense(day(6, 11), Money::from_units(50), "Food"),
            Transaction::income(day(6, 12), Money::from_units(900), None),
        ];
        let change = monthly_change(&txns, MonthKey::new(2024, 6).unwrap());
        assert_eq!(change.current_month_total, Money::from_units(150));
        assert_eq!(change.previous_month_total, Money::from_units(200));
        assert_eq!(change.change_percent, -25.0);

        let jan = monthly_change(&txns, MonthKey::new(2024, 1).unwrap());
        assert_eq!(jan.change_percent, 0.0);
    }
}
