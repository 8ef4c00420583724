//! Report service
//!
//! Dashboard numbers over a fresh transaction snapshot. The current year is
//! fixed when the service is built so every report in one run agrees on it.

use std::collections::BTreeMap;

use crate::error::LensResult;
use crate::models::{MonthKey, Transaction};
use crate::reports::{
    monthly_change, summarize, AggregationSummary, MonthlyChange, TimeWindow, TimeWindowFilter,
    YearBucketStats,
};
use crate::storage::TransactionStore;

pub struct ReportService<'a> {
    store: &'a dyn TransactionStore,
    filter: TimeWindowFilter,
}

impl<'a> ReportService<'a> {
    pub fn new(store: &'a dyn TransactionStore, current_year: i32) -> Self {
        Self {
            store,
            filter: TimeWindowFilter::new(current_year),
        }
    }

    pub fn current_year(&self) -> i32 {
        self.filter.current_year()
    }

    /// Transactions inside `window`
    pub fn window(&self, window: TimeWindow) -> LensResult<Vec<Transaction>> {
        let all = self.store.list_transactions()?;
        Ok(self.filter.filter(&all, window))
    }

    /// Headline numbers for `window`
    pub fn summary(&self, window: TimeWindow) -> LensResult<AggregationSummary> {
        Ok(summarize(&self.window(window)?))
    }

    /// Totals per calendar year
    pub fn years(&self) -> LensResult<BTreeMap<i32, YearBucketStats>> {
        Ok(self.filter.bucket_by_year(&self.store.list_transactions()?))
    }

    /// Years strictly before the current one that have data, newest first
    pub fn previous_years(&self) -> LensResult<Vec<i32>> {
        Ok(self.filter.previous_years(&self.store.list_transactions()?))
    }

    /// Expense change from the month before `month`
    pub fn monthly_change(&self, month: MonthKey) -> LensResult<MonthlyChange> {
        Ok(monthly_change(&self.store.list_transactions()?, month))
    }
}
