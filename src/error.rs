//! Custom error types for BudgetLens
//!
//! Validation failures are raised before any mutation reaches the store and
//! each carries its own message. Data-quality problems (bad dates, missing
//! categories) are never errors; the reports module degrades them instead.

use thiserror::Error;

/// The main error type for BudgetLens operations
#[derive(Error, Debug)]
pub enum LensError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Budget amount was zero or negative
    #[error("Budget amount must be greater than zero (got {0})")]
    InvalidAmount(String),

    /// Budget was submitted without any category
    #[error("A budget needs at least one category")]
    EmptyCategories,

    /// Month key did not match `YYYY-MM`
    #[error("Invalid month '{0}': expected YYYY-MM")]
    InvalidMonthKey(String),

    /// Candidate categories are already claimed by another budget that month
    #[error("Categories already budgeted for {month}: {}", categories.join(", "))]
    CategoryConflict {
        month: String,
        categories: Vec<String>,
    },

    /// Other validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LensError {
    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was raised by input validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidAmount(_)
                | Self::EmptyCategories
                | Self::InvalidMonthKey(_)
                | Self::CategoryConflict { .. }
        )
    }

    /// Check if this is a category conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::CategoryConflict { .. })
    }

    /// The conflicting categories, if this is a conflict error
    pub fn conflicting_categories(&self) -> &[String] {
        match self {
            Self::CategoryConflict { categories, .. } => categories,
            _ => &[],
        }
    }
}

impl From<std::io::Error> for LensError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LensError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for BudgetLens operations
pub type LensResult<T> = Result<T, LensError>;
