use anyhow::Result;
use clap::{Parser, Subcommand};

use budgetlens::audit::AuditLogger;
use budgetlens::cli::{
    handle_budget_command, handle_report_command, handle_transaction_command, BudgetCommands,
    ReportCommands, TransactionCommands,
};
use budgetlens::config::{paths::LensPaths, settings::Settings};
use budgetlens::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "budgetlens",
    version,
    about = "Multi-category monthly budgets and spending reports",
    long_about = "BudgetLens tracks expenses and incomes, lets one monthly budget \
                  cap several categories at once, and shows where each month \
                  stands against its budgets."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Create the data directory and default settings
    Init,

    /// Show configuration, or change one setting
    Config {
        /// Setting to change (currency_symbol, date_format, balance_convention, warning_threshold)
        key: Option<String>,
        /// New value
        #[arg(requires = "key")]
        value: Option<String>,
    },
}

fn main() -> Result<()> {
    budgetlens::init_tracing();
    let cli = Cli::parse();

    let paths = LensPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::History { limit }) => {
            let entries = AuditLogger::new(paths.audit_log()).read_recent(limit)?;
            if entries.is_empty() {
                println!("No history yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Init) => {
            if initialize_storage(&paths)? {
                println!("Initialized BudgetLens at: {}", paths.base_dir().display());
            } else {
                println!("BudgetLens is already set up at: {}", paths.base_dir().display());
            }
            println!();
            println!("Run 'budgetlens budget add Food Transport --amount 300' to create a budget.");
        }
        Some(Commands::Config { key, value }) => match (key, value) {
            (Some(key), Some(value)) => {
                settings.set(&key, &value)?;
                settings.save(&paths)?;
                println!("Set {} = {}", key, value);
            }
            (Some(key), None) => anyhow::bail!("Missing value for '{}'", key),
            _ => {
                println!("BudgetLens Configuration");
                println!("========================");
                println!("Base directory:     {}", paths.base_dir().display());
                println!("Data directory:     {}", paths.data_dir().display());
                println!("Audit log:          {}", paths.audit_log().display());
                println!();
                println!("Settings:");
                println!("  currency_symbol:    {}", settings.currency_symbol);
                println!("  date_format:        {}", settings.date_format);
                println!("  balance_convention: {}", settings.balance_convention);
                println!("  warning_threshold:  {}", settings.warning_threshold);
            }
        },
        None => {
            println!("BudgetLens - monthly budgets across categories");
            println!();
            println!("Run 'budgetlens --help' for usage information.");
        }
    }

    Ok(())
}
