//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers print
//! their own output and return errors for `main` to report.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{LensError, LensResult};
use crate::models::{Money, MonthKey};

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn current_year() -> i32 {
    today().year()
}

/// `--month` value, or the current month when absent
pub fn month_or_current(month: Option<&str>) -> LensResult<MonthKey> {
    match month {
        Some(raw) => MonthKey::parse(raw),
        None => Ok(MonthKey::of(today())),
    }
}

/// Parse a money argument such as `120`, `45.50` or `$1,200`
pub fn parse_amount(raw: &str) -> LensResult<Money> {
    Money::parse(raw).map_err(|e| LensError::Validation(e.to_string()))
}
