//! Budget CLI commands

use clap::Subcommand;

use super::{current_year, month_or_current, parse_amount};
use crate::audit::AuditLogger;
use crate::config::settings::Settings;
use crate::display::{format_budget_analysis, format_budget_list, format_calendar};
use crate::error::LensResult;
use crate::services::{BudgetService, CalendarService};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget shared by one or more categories
    Add {
        /// Category names (space or comma separated)
        #[arg(required = true, num_args = 1..)]
        categories: Vec<String>,
        /// Monthly cap (e.g., "300" or "300.00")
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List budgets for a month
    List {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// List budgets of every month
        #[arg(long, conflicts_with = "month")]
        all: bool,
    },

    /// Change a budget's cap
    Edit {
        /// Budget ID (full or short form)
        id: String,
        /// New monthly cap
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
    },

    /// Delete a budget
    Delete {
        /// Budget ID (full or short form)
        id: String,
    },

    /// Compare a month's budgets with its spending
    Analyze {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show the status of every month of a year
    Calendar {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

/// Split `Food,Transport Rent` style arguments into names
fn split_categories(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, settings: &Settings, cmd: BudgetCommands) -> LensResult<()> {
    let audit = AuditLogger::new(storage.paths().audit_log());
    let service = BudgetService::new(storage).with_audit(&audit);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Add {
            categories,
            amount,
            month,
        } => {
            let amount = parse_amount(&amount)?;
            let month = match month {
                Some(m) => m,
                None => month_or_current(None)?.to_string(),
            };
            let budget = service.create(&split_categories(&categories), amount, &month)?;
            println!(
                "Created budget {} for {}: {} capped at {}",
                budget.id,
                budget.month,
                budget.label(),
                budget.amount.format_with_symbol(symbol)
            );
        }

        BudgetCommands::List { month, all } => {
            let budgets = if all {
                storage.list_all_budgets()?
            } else {
                service.list(month_or_current(month.as_deref())?)?
            };
            println!("{}", format_budget_list(&budgets, symbol));
        }

        BudgetCommands::Edit { id, amount } => {
            let amount = parse_amount(&amount)?;
            let budget = storage.find_budget(&id)?;
            let updated = service.update_amount(budget.id, amount)?;
            println!(
                "Updated budget {}: {} -> {}",
                updated.id,
                budget.amount.format_with_symbol(symbol),
                updated.amount.format_with_symbol(symbol)
            );
        }

        BudgetCommands::Delete { id } => {
            let budget = storage.find_budget(&id)?;
            let removed = service.delete(budget.id)?;
            println!("Deleted budget {} ({} for {})", removed.id, removed.label(), removed.month);
        }

        BudgetCommands::Analyze { month } => {
            let month = month_or_current(month.as_deref())?;
            let overview = service.overview(month)?;
            print!("{}", format_budget_analysis(&overview, symbol));
            if overview.results.is_empty() {
                println!();
            }
        }

        BudgetCommands::Calendar { year } => {
            let year = year.unwrap_or_else(current_year);
            let calendar = CalendarService::new(storage)
                .with_classifier(settings.classifier())
                .year_status(year)?;
            print!("{}", format_calendar(&calendar));
        }
    }

    Ok(())
}
