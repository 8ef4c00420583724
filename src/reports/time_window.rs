//! Time window filtering
//!
//! Scopes a set of dated records to the current year, a given earlier year,
//! every earlier year, or everything. The current year is always supplied by
//! the caller so results never depend on the wall clock.
//!
//! Records without a usable date stay in the `All` window and are dropped
//! from every year-keyed view.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::LensError;
use crate::models::{Money, Transaction};

/// Anything that may carry a calendar date
pub trait DatedRecord {
    fn record_date(&self) -> Option<NaiveDate>;

    fn record_year(&self) -> Option<i32> {
        self.record_date().map(|d| d.year())
    }
}

impl DatedRecord for Transaction {
    fn record_date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl<T: DatedRecord + ?Sized> DatedRecord for &T {
    fn record_date(&self) -> Option<NaiveDate> {
        (**self).record_date()
    }
}

/// Which records take part in an aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    /// Every record, dated or not
    #[default]
    All,
    /// Records dated in the current year
    Current,
    /// A specific earlier year, or every year before the current one
    Previous { year: Option<i32> },
}

impl TimeWindow {
    /// Build a window from a mode name (`all`, `current`, `previous`) and an
    /// optional explicit year, which only `previous` uses
    pub fn from_mode(mode: &str, explicit_year: Option<i32>) -> Result<Self, LensError> {
        match mode.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "current" => Ok(Self::Current),
            "previous" => Ok(Self::Previous {
                year: explicit_year,
            }),
            other => Err(LensError::Validation(format!(
                "Unknown time window '{}': use all, current or previous",
                other
            ))),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = LensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_mode(s, None)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Current => write!(f, "current"),
            Self::Previous { year: Some(year) } => write!(f, "previous ({})", year),
            Self::Previous { year: None } => write!(f, "previous"),
        }
    }
}

/// Per-year totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct YearBucketStats {
    pub count: usize,
    /// Expenses minus incomes
    pub total: Money,
    pub expense_total: Money,
    pub income_total: Money,
}

impl YearBucketStats {
    fn record(&mut self, txn: &Transaction) {
        self.count += 1;
        if txn.is_income {
            self.income_total += txn.amount;
        } else {
            self.expense_total += txn.amount;
        }
        self.total = self.expense_total - self.income_total;
    }
}

/// Filters records by time window relative to an injected current year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindowFilter {
    current_year: i32,
}

impl TimeWindowFilter {
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Whether `record` belongs to `window`
    pub fn matches<R: DatedRecord>(&self, record: &R, window: TimeWindow) -> bool {
        match window {
            TimeWindow::All => true,
            TimeWindow::Current => record.record_year() == Some(self.current_year),
            TimeWindow::Previous { year: Some(year) } => record.record_year() == Some(year),
            TimeWindow::Previous { year: None } => record
                .record_year()
                .is_some_and(|year| year < self.current_year),
        }
    }

    /// Records belonging to `window`, in input order
    pub fn filter<R: DatedRecord + Clone>(&self, records: &[R], window: TimeWindow) -> Vec<R> {
        let kept: Vec<R> = records
            .iter()
            .filter(|r| self.matches(*r, window))
            .cloned()
            .collect();
        tracing::debug!(
            window = %window,
            input = records.len(),
            kept = kept.len(),
            "filtered records by time window"
        );
        kept
    }

    /// Every year that appears in the data, newest first
    pub fn years_present<R: DatedRecord>(&self, records: &[R]) -> Vec<i32> {
        let years: BTreeSet<i32> = records.iter().filter_map(|r| r.record_year()).collect();
        years.into_iter().rev().collect()
    }

    /// Years strictly before the current year, newest first
    pub fn previous_years<R: DatedRecord>(&self, records: &[R]) -> Vec<i32> {
        self.years_present(records)
            .into_iter()
            .filter(|year| *year < self.current_year)
            .collect()
    }

    /// Group transactions by calendar year. Undated transactions are left out.
    pub fn bucket_by_year(&self, transactions: &[Transaction]) -> BTreeMap<i32, YearBucketStats> {
        let mut buckets: BTreeMap<i32, YearBucketStats> = BTreeMap::new();
        let mut undated = 0usize;
        for txn in transactions {
            match txn.year() {
                Some(year) => buckets.entry(year).or_default().record(txn),
                None => undated += 1,
            }
        }
        if undated > 0 {
            tracing::debug!(undated, "transactions without a usable date left out of year buckets");
        }
        buckets
    }
}

/// Filter transactions by window mode against an explicit current year
pub fn filter_by_window(
    transactions: &[Transaction],
    window: TimeWindow,
    current_year: i32,
) -> Vec<Transaction> {
    TimeWindowFilter::new(current_year).filter(transactions, window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionId;

    fn txn(date: Option<(i32, u32, u32)>, cents: i64, income: bool) -> Transaction {
        let date = date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
        Transaction::new(date, Money::from_cents(cents), Some("Food".into()), income)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(Some((2024, 3, 1)), 1000, false),
            txn(Some((2023, 7, 4)), 2000, false),
            txn(Some((2021, 1, 1)), 500, true),
            txn(None, 700, false),
            txn(Some((2024, 12, 31)), 300, true),
        ]
    }

    #[test]
    fn test_all_is_identity() {
        let data = sample();
        let filter = TimeWindowFilter::new(2024);
        let all = filter.filter(&data, TimeWindow::All);
        assert_eq!(all, data);
        assert_eq!(filter.filter(&all, TimeWindow::All), all);
    }

    #[test]
    fn test_current_and_previous() {
        let data = sample();
        let filter = TimeWindowFilter::new(2024);

        let current = filter.filter(&data, TimeWindow::Current);
        assert_eq!(current.len(), 2);
        assert!(current.iter().all(|t| t.year() == Some(2024)));

        let previous = filter.filter(&data, TimeWindow::Previous { year: None });
        assert_eq!(previous.len(), 2);

        let only_2021 = filter.filter(&data, TimeWindow::Previous { year: Some(2021) });
        assert_eq!(only_2021.len(), 1);
        assert_eq!(only_2021[0].year(), Some(2021));
    }

    #[test]
    fn test_partition_law() {
        let data = sample();
        let filter = TimeWindowFilter::new(2024);
        let current = filter.filter(&data, TimeWindow::Current);
        let previous = filter.filter(&data, TimeWindow::Previous { year: None });
        let undated: Vec<_> = data.iter().filter(|t| t.date.is_none()).collect();

        let mut ids: Vec<TransactionId> = current
            .iter()
            .chain(previous.iter())
            .map(|t| t.id)
            .chain(undated.iter().map(|t| t.id))
            .collect();
        assert!(current.iter().all(|c| previous.iter().all(|p| p.id != c.id)));

        ids.sort();
        let mut expected: Vec<_> = data.iter().map(|t| t.id).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_empty_input() {
        let filter = TimeWindowFilter::new(2024);
        let empty: Vec<Transaction> = Vec::new();
        assert!(filter.filter(&empty, TimeWindow::Current).is_empty());
        assert!(filter.bucket_by_year(&empty).is_empty());
        assert!(filter.years_present(&empty).is_empty());
    }

    #[test]
    fn test_years_descending() {
        let data = sample();
        let filter = TimeWindowFilter::new(2024);
        assert_eq!(filter.years_present(&data), vec![2024, 2023, 2021]);
        assert_eq!(filter.previous_years(&data), vec![2023, 2021]);
    }

    #[test]
    fn test_bucket_by_year() {
        let data = sample();
        let buckets = TimeWindowFilter::new(2024).bucket_by_year(&data);
        assert_eq!(buckets.len(), 3);

        let y2024 = buckets[&2024];
        assert_eq!(y2024.count, 2);
        assert_eq!(y2024.expense_total.cents(), 1000);
        assert_eq!(y2024.income_total.cents(), 300);
        assert_eq!(y2024.total.cents(), 700);

        assert_eq!(buckets[&2021].total.cents(), -500);
        let counted: usize = buckets.values().map(|b| b.count).sum();
        assert_eq!(counted, data.len() - 1);
    }

    #[test]
    fn test_from_mode() {
        assert_eq!(TimeWindow::from_mode("ALL", Some(2020)).unwrap(), TimeWindow::All);
        assert_eq!(
            TimeWindow::from_mode("previous", Some(2020)).unwrap(),
            TimeWindow::Previous { year: Some(2020) }
        );
        assert!(TimeWindow::from_mode("last-week", None).is_err());
        assert_eq!("current".parse::<TimeWindow>().unwrap(), TimeWindow::Current);
    }

    #[test]
    fn test_works_on_borrowed_records() {
        let data = sample();
        let refs: Vec<&Transaction> = data.iter().collect();
        let filter = TimeWindowFilter::new(2024);
        assert_eq!(filter.filter(&refs, TimeWindow::Current).len(), 2);
    }
}
