//! Display formatting for terminal output
//!
//! Everything here turns report values into strings; nothing prints.

pub mod budget;
pub mod calendar;
pub mod report;
pub mod summary;
pub mod transaction;

pub use budget::{format_budget_analysis, format_budget_list};
pub use calendar::format_calendar;
pub use summary::{format_monthly_change, format_summary, format_year_buckets};
pub use transaction::format_transaction_list;
