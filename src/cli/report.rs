//! Report CLI commands

use clap::Subcommand;

use super::{current_year, month_or_current};
use crate::config::settings::Settings;
use crate::display::{format_monthly_change, format_summary, format_year_buckets};
use crate::error::LensResult;
use crate::reports::TimeWindow;
use crate::services::ReportService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Headline totals for a time window
    Summary {
        /// Time window: all, current or previous
        #[arg(short, long, default_value = "current")]
        window: String,
        /// Year for the previous window
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Totals per calendar year
    Years,

    /// Expenses compared with the previous month
    Change {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(storage: &Storage, settings: &Settings, cmd: ReportCommands) -> LensResult<()> {
    let reports = ReportService::new(storage, current_year());
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary { window, year } => {
            let window = TimeWindow::from_mode(&window, year)?;
            let summary = reports.summary(window)?;
            print!(
                "{}",
                format_summary(&summary, window, settings.balance_convention, symbol)
            );
        }

        ReportCommands::Years => {
            println!("{}", format_year_buckets(&reports.years()?, symbol));
        }

        ReportCommands::Change { month } => {
            let month = month_or_current(month.as_deref())?;
            print!("{}", format_monthly_change(&reports.monthly_change(month)?, symbol));
        }
    }

    Ok(())
}
