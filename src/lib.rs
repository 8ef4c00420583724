//! BudgetLens - monthly budgets across categories
//!
//! A budgeting engine over transaction and budget snapshots, with a JSON
//! file store and a command-line front end.
//!
//! # Architecture
//!
//! - `models`: transactions, budgets and the value types they use
//! - `reports`: pure aggregation (time windows, budget analysis, calendar
//!   status, summaries)
//! - `storage`: the `TransactionStore` trait and its JSON implementation
//! - `services`: snapshot-then-compute wrappers with audit logging
//! - `audit`: append-only change log
//! - `config`: paths and user settings
//! - `display` / `cli`: terminal rendering and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use budgetlens::models::{Budget, Money, MonthKey, Transaction};
//! use budgetlens::reports::analyze_budgets;
//!
//! let june = MonthKey::parse("2024-06")?;
//! let budget = Budget::from_input(&["Food", "Transport"], Money::from_units(300), "2024-06")?;
//! let results = analyze_budgets(&[budget], &transactions, june);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LensError, LensResult};

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install the global `tracing` subscriber once. `RUST_LOG` overrides the
/// default of warnings only; output goes to stderr.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("budgetlens=warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
