//! Budget model
//!
//! A budget caps spending for one month across one or more categories. When
//! several categories share a budget their spending is pooled against the
//! single `amount`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::CategorySet;
use super::ids::BudgetId;
use super::money::Money;
use super::month::MonthKey;
use crate::error::{LensError, LensResult};

/// A monthly spending cap shared by a set of categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    /// Categories sharing this cap (never empty once validated)
    pub categories: CategorySet,

    /// Cap for the month, applied to the pooled spend of all categories
    pub amount: Money,

    /// The month this budget applies to
    pub month: MonthKey,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a budget from already-validated parts
    pub fn new(categories: CategorySet, amount: Money, month: MonthKey) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            categories,
            amount,
            month,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate raw user input and build a budget from it
    pub fn from_input<S: AsRef<str>>(categories: &[S], amount: Money, month: &str) -> LensResult<Self> {
        let (categories, amount, month) = validate_budget_input(categories, amount, month)?;
        Ok(Self::new(categories, amount, month))
    }

    /// Change the cap
    pub fn set_amount(&mut self, amount: Money) -> LensResult<()> {
        validate_amount(amount)?;
        self.amount = amount;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether `category` is one of this budget's categories
    pub fn covers(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    pub fn label(&self) -> String {
        self.categories.label()
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.month, self.label(), self.amount)
    }
}

/// Check the three shape rules for a new budget, each with its own error:
/// amount must be positive, at least one category, month must be `YYYY-MM`.
pub fn validate_budget_input<S: AsRef<str>>(
    categories: &[S],
    amount: Money,
    month: &str,
) -> LensResult<(CategorySet, Money, MonthKey)> {
    validate_amount(amount)?;
    let set: CategorySet = categories.iter().map(|c| -> &str { c.as_ref() }).collect();
    if set.is_empty() {
        return Err(LensError::EmptyCategories);
    }
    let month = MonthKey::parse(month)?;
    Ok((set, amount, month))
}

fn validate_amount(amount: Money) -> LensResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LensError::InvalidAmount(amount.to_string()))
    }
}
