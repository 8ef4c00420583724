//! Calendar grid formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_percentage, status_badge};
use crate::services::YearCalendar;

#[derive(Tabled)]
struct CalendarRow {
    #[tabled(rename = "Month")]
    month: &'static str,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Budgets")]
    budgets: usize,
}

/// Twelve-row status grid for a year
pub fn format_calendar(calendar: &YearCalendar) -> String {
    let rows = calendar.cells.iter().map(|cell| CalendarRow {
        month: cell.month.short_name(),
        status: format!("{} {}", status_badge(cell.status), cell.status),
        used: cell
            .combined_percentage
            .map(format_percentage)
            .unwrap_or_else(|| "-".to_string()),
        budgets: cell.budget_count,
    });

    format!(
        "Budget calendar {}\n{}\n",
        calendar.year,
        Table::new(rows).with(Style::rounded())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::MonthlyStatusClassifier;
    use std::collections::HashMap;

    #[test]
    fn test_empty_year_renders_all_months() {
        let cells = MonthlyStatusClassifier::default().classify_year_cells(2024, &HashMap::new(), &HashMap::new());
        let output = format_calendar(&YearCalendar { year: 2024, cells });
        assert!(output.starts_with("Budget calendar 2024"));
        assert!(output.contains("Jan"));
        assert!(output.contains("Dec"));
        assert_eq!(output.matches("none").count(), 12);
    }
}
