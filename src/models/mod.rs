//! Core data models for BudgetLens
//!
//! Transactions and budgets as the store hands them over, plus the value
//! types they are built from.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;

pub use budget::{validate_budget_input, Budget};
pub use category::{normalize_category, CategorySet, UNKNOWN_CATEGORY};
pub use ids::{BudgetId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use month::MonthKey;
pub use transaction::{parse_date, Transaction};
