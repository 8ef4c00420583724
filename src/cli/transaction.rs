//! Transaction CLI commands

use clap::Subcommand;

use super::{current_year, parse_amount, today};
use crate::audit::AuditLogger;
use crate::config::settings::Settings;
use crate::display::format_transaction_list;
use crate::error::{LensError, LensResult};
use crate::models::{parse_date, Transaction};
use crate::reports::TimeWindow;
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an expense (or an income with --income)
    Add {
        /// Amount (e.g., "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Record as income
        #[arg(short, long)]
        income: bool,
        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List transactions
    List {
        /// Time window: all, current or previous
        #[arg(short, long, default_value = "all")]
        window: String,
        /// Year for the previous window
        #[arg(short, long)]
        year: Option<i32>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short form)
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LensResult<()> {
    let audit = AuditLogger::new(storage.paths().audit_log());
    let service = TransactionService::new(storage).with_audit(&audit);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            date,
            income,
            note,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(raw) => parse_date(&raw)
                    .ok_or_else(|| LensError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", raw)))?,
                None => today(),
            };
            let mut txn = Transaction::new(Some(date), amount, category, income);
            if let Some(note) = note {
                txn = txn.with_note(note);
            }
            let txn = service.add(txn)?;
            println!(
                "Recorded {} {} on {} ({}) [{}]",
                if txn.is_income { "income" } else { "expense" },
                txn.amount.format_with_symbol(symbol),
                date.format(&settings.date_format),
                txn.category_label(),
                txn.id
            );
        }

        TransactionCommands::List {
            window,
            year,
            category,
            limit,
        } => {
            let mut filter = TransactionFilter::new()
                .window(TimeWindow::from_mode(&window, year)?)
                .limit(limit);
            if let Some(category) = category {
                filter = filter.category(category);
            }
            let transactions = service.list(&filter, current_year())?;
            println!(
                "{}",
                format_transaction_list(&transactions, symbol, &settings.date_format)
            );
        }

        TransactionCommands::Delete { id } => {
            let removed = service.delete(&id)?;
            println!("Deleted transaction {} ({})", removed.id, removed);
        }
    }

    Ok(())
}
