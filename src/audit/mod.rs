//! Audit logging for BudgetLens
//!
//! Every budget create/update/delete and every transaction add/delete is
//! appended to `audit.log` as one JSON object per line, with the entity's
//! state before and after the change.
//!
//! ```rust,ignore
//! use budgetlens::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(EntityType::Budget, budget.id.to_string(), Some(budget.label()), &budget))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
