//! Display formatting for terminal output

pub mod budget;
pub mod records;

pub use budget::{format_budget_list, format_category_list, format_status_table};
pub use records::{format_expense_list, format_goal_list, format_income_list};
