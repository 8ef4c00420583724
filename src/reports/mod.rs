//! Reports module for BudgetLens
//!
//! Pure aggregation over transaction and budget snapshots: time windows,
//! budget analysis, calendar month status, and headline summaries. Nothing
//! here touches storage or the clock.

pub mod budget_analysis;
pub mod month_status;
pub mod summary;
pub mod time_window;

pub use budget_analysis::{
    analyze_budgets, check_category_conflicts, claimed_categories, over_budget, total_budget_cap,
    validate_new_budget, BudgetAnalysisResult, BudgetAnalyzer, BudgetOverview,
};
pub use month_status::{
    classify_year, group_by_month, MonthCell, MonthStatus, MonthlyStatusClassifier,
    DEFAULT_WARNING_THRESHOLD,
};
pub use summary::{
    change_percent, monthly_change, summarize, AggregationSummary, BalanceConvention, CategoryTotal,
    MonthlyChange,
};
pub use time_window::{filter_by_window, DatedRecord, TimeWindow, TimeWindowFilter, YearBucketStats};
