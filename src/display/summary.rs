//! Summary, year and month-over-month formatting

use std::collections::BTreeMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_bar, format_change, format_percentage, separator};
use crate::reports::{AggregationSummary, BalanceConvention, MonthlyChange, TimeWindow, YearBucketStats};

#[derive(Tabled)]
struct YearRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Transactions")]
    count: usize,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Net spend")]
    net: String,
}

/// Dashboard cards for `window`; the headline uses `convention`
pub fn format_summary(
    summary: &AggregationSummary,
    window: TimeWindow,
    convention: BalanceConvention,
    symbol: &str,
) -> String {
    let money = |m: crate::models::Money| m.format_with_symbol(symbol);
    let mut output = format!("Summary ({})\n{}\n", window, separator(40));

    output.push_str(&format!("Transactions:    {}\n", summary.transaction_count));
    output.push_str(&format!("Total expenses:  {}\n", money(summary.total_expenses)));
    output.push_str(&format!("Total income:    {}\n", money(summary.total_incomes)));
    let headline = match convention {
        BalanceConvention::NetSpend => "Net spend:",
        BalanceConvention::Surplus => "Surplus:",
    };
    output.push_str(&format!("{:<17}{}\n", headline, money(summary.headline_total(convention))));
    output.push_str(&format!("Average expense: {}\n", money(summary.average_expense)));

    match &summary.top_category {
        Some(top) => output.push_str(&format!("Top category:    {} ({})\n", top.category, money(top.total))),
        None => output.push_str("Top category:    -\n"),
    }

    if !summary.by_category.is_empty() {
        output.push('\n');
        for cat in &summary.by_category {
            let share = summary.share_of_expenses(cat);
            output.push_str(&format!(
                "  {:<16} {:>12}  {} {}\n",
                cat.category,
                money(cat.total),
                format_bar(share, 100.0, 20),
                format_percentage(share)
            ));
        }
    }
    output
}

/// Per-year totals, newest first
pub fn format_year_buckets(buckets: &BTreeMap<i32, YearBucketStats>, symbol: &str) -> String {
    if buckets.is_empty() {
        return "No dated transactions.".to_string();
    }

    let rows = buckets.iter().rev().map(|(year, stats)| YearRow {
        year: *year,
        count: stats.count,
        expenses: stats.expense_total.format_with_symbol(symbol),
        income: stats.income_total.format_with_symbol(symbol),
        net: stats.total.format_with_symbol(symbol),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn format_monthly_change(change: &MonthlyChange, symbol: &str) -> String {
    format!(
        "Expenses {}: {} (previous month {}, change {})\n",
        change.month,
        change.current_month_total.format_with_symbol(symbol),
        change.previous_month_total.format_with_symbol(symbol),
        format_change(change.change_percent),
    )
}
