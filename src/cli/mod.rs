//! CLI command handlers
//!
//! Bridges clap argument parsing with the budget session.

pub mod budget;
pub mod category;
pub mod expense;
pub mod goal;
pub mod income;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use income::{handle_income_command, IncomeCommands};

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{ZennyError, ZennyResult};
use crate::models::Money;
use crate::services::SaveStatus;

/// Parse a user-entered amount
pub(crate) fn parse_amount(input: &str) -> ZennyResult<Money> {
    Money::parse(input).map_err(|e| ZennyError::InvalidAmount(format!("'{}': {}", input, e)))
}

/// Parse a YYYY-MM-DD date
pub(crate) fn parse_date(input: &str) -> ZennyResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ZennyError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", input))
    })
}

/// Parse a YYYY-MM-DD date as noon UTC on that day
pub(crate) fn parse_timestamp(input: &str) -> ZennyResult<DateTime<Utc>> {
    let date = parse_date(input)?;
    date.and_hms_opt(12, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ZennyError::Validation(format!("Invalid date '{}'", input)))
}

/// Parse a record id, with or without its display prefix
pub(crate) fn parse_id<T: FromStr>(input: &str, entity: &str) -> ZennyResult<T> {
    input
        .parse()
        .map_err(|_| ZennyError::Validation(format!("Invalid {} id: {}", entity, input)))
}

/// Tell the user when a change was not written to the store
pub(crate) fn report_save(status: &SaveStatus) {
    if let SaveStatus::Failed(reason) = status {
        eprintln!("Warning: change kept locally but not saved ({})", reason);
    }
}
