//! Expense (receipt) records
//!
//! Records are immutable once created; the only lifecycle event after
//! creation is deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;

/// A saved receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub amount: Money,
    pub category: Category,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Input for a new expense, before it is given an id
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub amount: Money,
    pub category: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub tag: Option<String>,
}

impl ExpenseDraft {
    pub fn new(amount: Money, category: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            timestamp: None,
            tag: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

impl ExpenseRecord {
    /// Build a record from a draft whose category has already been resolved
    pub fn from_draft(draft: ExpenseDraft, category: Category) -> Self {
        let tag = draft
            .tag
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self {
            id: ExpenseId::new(),
            amount: draft.amount,
            category,
            timestamp: draft.timestamp.unwrap_or_else(Utc::now),
            tag,
        }
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.timestamp.format("%Y-%m-%d"),
            self.amount,
            self.category
        )?;
        if let Some(tag) = &self.tag {
            write!(f, " #{}", tag)?;
        }
        Ok(())
    }
}
