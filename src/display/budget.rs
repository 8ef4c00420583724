//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_bar, format_percentage};
use crate::models::Budget;
use crate::reports::BudgetOverview;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Categories")]
    categories: String,
    #[tabled(rename = "Cap")]
    amount: String,
}

#[derive(Tabled)]
struct AnalysisRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Categories")]
    categories: String,
    #[tabled(rename = "Cap")]
    cap: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "")]
    flag: String,
}

/// Budgets as a table
pub fn format_budget_list(budgets: &[Budget], symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        id: b.id.to_string(),
        month: b.month.to_string(),
        categories: b.label(),
        amount: b.amount.format_with_symbol(symbol),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Month analysis: one row per budget, then pooled totals
pub fn format_budget_analysis(overview: &BudgetOverview, symbol: &str) -> String {
    if overview.results.is_empty() {
        return format!("No budgets for {}.", overview.month);
    }

    let rows = overview.results.iter().map(|r| AnalysisRow {
        id: r.budget.id.to_string(),
        categories: r.budget.label(),
        cap: r.budget.amount.format_with_symbol(symbol),
        spent: r.spent.format_with_symbol(symbol),
        remaining: r.remaining.format_with_symbol(symbol),
        used: format!("{} {}", format_bar(r.percentage, 100.0, 10), format_percentage(r.raw_percentage)),
        flag: if r.is_over_budget {
            format!("over by {}", r.overspent_by().format_with_symbol(symbol))
        } else {
            String::new()
        },
    });

    let mut output = format!("Budgets for {}\n", overview.month);
    output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    output.push('\n');
    output.push_str(&format!(
        "Total cap: {}   Spent in budgeted categories: {}   Remaining: {}",
        overview.total_budget_cap.format_with_symbol(symbol),
        overview.total_spent_in_budgeted_categories.format_with_symbol(symbol),
        overview.total_remaining().format_with_symbol(symbol),
    ));
    if let Some(pct) = overview.combined_percentage() {
        output.push_str(&format!(" ({})", format_percentage(pct)));
    }
    output.push('\n');
    output
}
