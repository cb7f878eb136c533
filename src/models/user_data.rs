//! The per-user persisted document
//!
//! Every field is defaulted so that a partial or older document still loads;
//! missing keys hydrate to empty collections and disabled notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::budget::BudgetEntry;
use super::category::Category;
use super::expense::ExpenseRecord;
use super::goal::SavingsGoal;
use super::income::IncomeRecord;

/// User notification preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub enabled: bool,
}

/// Snapshot of everything the engine persists for one user
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub receipts: Vec<ExpenseRecord>,

    #[serde(default)]
    pub incomes: Vec<IncomeRecord>,

    #[serde(default)]
    pub goals: Vec<SavingsGoal>,

    #[serde(default)]
    pub categories: Vec<Category>,

    /// Keyed by category display name
    #[serde(default)]
    pub budgets: BTreeMap<String, BudgetEntry>,

    #[serde(default)]
    pub notification_settings: NotificationSettings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
