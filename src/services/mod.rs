//! Service layer for BudgetLens
//!
//! Services sit between the front end and the store: they snapshot what the
//! reports engine needs, run it, and record mutations in the audit log.

pub mod budget;
pub mod calendar;
pub mod report;
pub mod transaction;

pub use budget::BudgetService;
pub use calendar::{CalendarService, YearCalendar};
pub use report::ReportService;
pub use transaction::{TransactionFilter, TransactionService};
