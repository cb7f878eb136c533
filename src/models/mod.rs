//! Core data models for Zenny
//!
//! Categories, budget entries, ledger records and the per-user document that
//! bundles them for persistence.

pub mod budget;
pub mod category;
pub mod expense;
pub mod goal;
pub mod ids;
pub mod income;
pub mod money;
pub mod user_data;

pub use budget::{AlertState, BudgetEntry, DEFAULT_THRESHOLD};
pub use category::{Category, CategoryKey, DEFAULT_CATEGORIES};
pub use expense::{ExpenseDraft, ExpenseRecord};
pub use goal::SavingsGoal;
pub use ids::{ExpenseId, GoalId, IncomeId, UserId};
pub use income::IncomeRecord;
pub use money::Money;
pub use user_data::{NotificationSettings, UserData};
