//! Receipt, income and goal listings

use crate::models::{ExpenseRecord, IncomeRecord, Money, SavingsGoal};

/// Format receipts newest first
pub fn format_expense_list(records: &[ExpenseRecord], symbol: &str) -> String {
    if records.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let mut sorted: Vec<&ExpenseRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut output = String::new();
    for record in sorted {
        output.push_str(&format!(
            "{}  {:>12}  {}",
            record.timestamp.format("%Y-%m-%d"),
            record.amount.format_with_symbol(symbol),
            record.category
        ));
        if let Some(tag) = &record.tag {
            output.push_str(&format!(" #{}", tag));
        }
        output.push_str(&format!("  [{}]\n", record.id));
    }

    let total: Money = records.iter().map(|r| r.amount).sum();
    output.push_str(&format!("Total: {}\n", total.format_with_symbol(symbol)));
    output
}

pub fn format_income_list(records: &[IncomeRecord], symbol: &str) -> String {
    if records.is_empty() {
        return "No income recorded.".to_string();
    }

    let mut output = String::new();
    for record in records {
        output.push_str(&format!(
            "{}  {:>12}  {}  [{}]\n",
            record.timestamp.format("%Y-%m-%d"),
            record.amount.format_with_symbol(symbol),
            record.source,
            record.id
        ));
    }
    let total: Money = records.iter().map(|r| r.amount).sum();
    output.push_str(&format!("Total: {}\n", total.format_with_symbol(symbol)));
    output
}

pub fn format_goal_list(goals: &[SavingsGoal], symbol: &str) -> String {
    if goals.is_empty() {
        return "No savings goals.".to_string();
    }

    let mut output = String::new();
    for goal in goals {
        output.push_str(&format!(
            "{}: {} of {} ({:.1}%)",
            goal.name,
            goal.saved.format_with_symbol(symbol),
            goal.target.format_with_symbol(symbol),
            goal.progress_percent()
        ));
        if let Some(deadline) = goal.deadline {
            output.push_str(&format!(" by {}", deadline));
        }
        if goal.is_complete() {
            output.push_str(" (complete)");
        }
        output.push_str(&format!("  [{}]\n", goal.id));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseDraft};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_expense_list_newest_first_with_total() {
        let food = Category::parse("Food").unwrap();
        let older = ExpenseRecord::from_draft(
            ExpenseDraft::new(Money::from_units(5), "Food")
                .at(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
            food.clone(),
        );
        let newer = ExpenseRecord::from_draft(
            ExpenseDraft::new(Money::from_units(7), "Food")
                .at(Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap())
                .with_tag("lunch"),
            food,
        );

        let output = format_expense_list(&[older, newer], "$");
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("2024-02-01"));
        assert!(lines[0].contains("#lunch"));
        assert_eq!(lines[2], "Total: $12.00");
    }

    #[test]
    fn test_goal_list() {
        let mut goal = SavingsGoal::new("Bike", Money::from_units(200));
        goal.contribute(Money::from_units(50));
        let output = format_goal_list(&[goal], "$");
        assert!(output.starts_with("Bike: $50.00 of $200.00 (25.0%)"));
    }
}
