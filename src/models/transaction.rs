//! Transaction model
//!
//! A transaction is a dated expense or income. Data imported from the outside
//! world is not always clean, so the date is optional: a missing or
//! unparseable date loads as `None` instead of failing the whole file.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::category::{normalize_category, UNKNOWN_CATEGORY};
use super::ids::TransactionId;
use super::money::Money;
use super::month::MonthKey;

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Day the transaction happened; `None` when missing or unreadable
    #[serde(default, with = "lenient_date")]
    pub date: Option<NaiveDate>,

    /// Non-negative amount; direction comes from `is_income`
    pub amount: Money,

    /// Category label (optional)
    #[serde(default)]
    pub category: Option<String>,

    /// Incomes reduce totals instead of adding to them
    #[serde(default)]
    pub is_income: bool,

    #[serde(default)]
    pub note: String,

    /// When the transaction was recorded
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        date: Option<NaiveDate>,
        amount: Money,
        category: Option<String>,
        is_income: bool,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            amount,
            category,
            is_income,
            note: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Create an expense on `date` in `category`
    pub fn expense(date: NaiveDate, amount: Money, category: impl Into<String>) -> Self {
        Self::new(Some(date), amount, Some(category.into()), false)
    }

    /// Create an income on `date`
    pub fn income(date: NaiveDate, amount: Money, category: Option<String>) -> Self {
        Self::new(Some(date), amount, category, true)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn is_expense(&self) -> bool {
        !self.is_income
    }

    /// Calendar year of the date, if the date is usable
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.date.map(|d| d.year())
    }

    /// Month of the date, if the date is usable
    pub fn month_key(&self) -> Option<MonthKey> {
        self.date.map(MonthKey::of)
    }

    /// Category for display and grouping, `"unknown"` when absent or blank
    pub fn category_label(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_CATEGORY,
        }
    }

    /// Normalized category key, `None` when absent or blank
    pub fn category_key(&self) -> Option<String> {
        self.category
            .as_deref()
            .map(normalize_category)
            .filter(|key| !key.is_empty())
    }

    /// Signed contribution to a cost-positive total
    pub fn signed_amount(&self) -> Money {
        if self.is_income {
            -self.amount
        } else {
            self.amount
        }
    }

    /// Validate a transaction before it is recorded
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "????-??-??".to_string());
        let sign = if self.is_income { "+" } else { "-" };
        write!(f, "{} {}{} {}", date, sign, self.amount, self.category_label())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("Transaction amount cannot be negative")]
    NegativeAmount,
}

/// Parse a user- or file-supplied date. Accepts `YYYY-MM-DD`, `YYYY/MM/DD`
/// and RFC 3339 timestamps (the date part is kept).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

mod lenient_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match raw {
            serde_json::Value::String(s) => parse_date(&s),
            _ => None,
        })
    }
}
