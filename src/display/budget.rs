//! Budget and category display formatting

use crate::models::{BudgetEntry, Category};
use crate::services::CategoryStatus;

/// Format a simple list of categories
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let mut output = String::from("Categories:\n");
    for category in categories {
        output.push_str(&format!("  {}\n", category));
    }
    output
}

/// Format budget entries as a table
pub fn format_budget_list<'a>(
    entries: impl IntoIterator<Item = (&'a str, &'a BudgetEntry)>,
    symbol: &str,
) -> String {
    let entries: Vec<_> = entries.into_iter().collect();
    if entries.is_empty() {
        return "No budgets set.".to_string();
    }

    let name_width = entries
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>12}  {:>9}  {}\n",
        "Category",
        "Limit",
        "Threshold",
        "Alerted",
        width = name_width
    ));
    output.push_str(&format!("{}\n", "-".repeat(name_width + 35)));

    for (name, entry) in entries {
        let limit = if entry.is_budgeted() {
            entry.amount.format_with_symbol(symbol)
        } else {
            "-".to_string()
        };
        output.push_str(&format!(
            "{:<width$}  {:>12}  {:>8}%  {}\n",
            name,
            limit,
            entry.threshold,
            if entry.state.is_alerted() { "yes" } else { "no" },
            width = name_width
        ));
    }

    output
}

/// Format spend against budget for every category
pub fn format_status_table(statuses: &[CategoryStatus], symbol: &str) -> String {
    if statuses.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = statuses
        .iter()
        .map(|s| s.category.name().len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>12}  {:>12}  {:>7}\n",
        "Category",
        "Spent",
        "Budget",
        "Used",
        width = name_width
    ));
    output.push_str(&format!("{}\n", "-".repeat(name_width + 37)));

    for status in statuses {
        let (budget, used) = match status.percent_spent {
            Some(percent) => (
                status.entry.amount.format_with_symbol(symbol),
                format!("{:.1}%", percent),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        let marker = if status.entry.state.is_alerted() { " !" } else { "" };

        output.push_str(&format!(
            "{:<width$}  {:>12}  {:>12}  {:>7}{}\n",
            status.category.name(),
            status.spent.format_with_symbol(symbol),
            budget,
            used,
            marker,
            width = name_width
        ));
    }

    output
}
