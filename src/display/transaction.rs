//! Transaction display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// Transactions as a table. Incomes are shown with a leading `+`.
pub fn format_transaction_list(transactions: &[Transaction], symbol: &str, date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow {
        id: t.id.to_string(),
        date: t
            .date
            .map(|d| d.format(date_format).to_string())
            .unwrap_or_else(|| "(no date)".to_string()),
        category: t.category_label().to_string(),
        amount: if t.is_income {
            format!("+{}", t.amount.format_with_symbol(symbol))
        } else {
            t.amount.format_with_symbol(symbol)
        },
        note: truncate(&t.note, 30),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}
