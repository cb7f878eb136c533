//! Expense ledger
//!
//! Append/remove log of receipts. Totals are recomputed from the full list on
//! every call; there is no running cache to fall out of step with removals.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CategoryKey, ExpenseId, ExpenseRecord, Money};

/// Which records count toward a total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpendWindow {
    /// Every record
    #[default]
    All,
    /// Records at or after the instant
    Since(DateTime<Utc>),
    /// Records in `[start, end)`
    Between(DateTime<Utc>, DateTime<Utc>),
}

impl SpendWindow {
    /// The calendar month (UTC) containing `now`
    pub fn month_of(now: DateTime<Utc>) -> Self {
        let start = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(now);
        Self::Since(start)
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        match *self {
            Self::All => true,
            Self::Since(start) => at >= start,
            Self::Between(start, end) => at >= start && at < end,
        }
    }
}

/// Window policy stored in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendPeriod {
    /// Budgets cover all recorded spending
    #[default]
    All,
    /// Budgets cover the current calendar month
    Month,
}

impl SpendPeriod {
    pub fn window(&self, now: DateTime<Utc>) -> SpendWindow {
        match self {
            Self::All => SpendWindow::All,
            Self::Month => SpendWindow::month_of(now),
        }
    }
}

/// The user's receipts
#[derive(Debug, Clone, Default)]
pub struct ExpenseLedger {
    records: Vec<ExpenseRecord>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }

    /// Append a record; identical submissions are kept as separate entries
    pub fn add(&mut self, record: ExpenseRecord) -> &ExpenseRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Remove a record by id; a missing id is not an error
    pub fn remove(&mut self, id: ExpenseId) -> Option<ExpenseRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn get(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Sum of amounts for a category, ignoring case
    pub fn total_for(&self, category: &str, window: SpendWindow) -> Money {
        let key = CategoryKey::new(category);
        self.records
            .iter()
            .filter(|r| r.category.key() == key && window.contains(r.timestamp))
            .map(|r| r.amount)
            .sum()
    }

    /// Whether any record references the category
    pub fn uses_category(&self, category: &str) -> bool {
        let key = CategoryKey::new(category);
        self.records.iter().any(|r| r.category.key() == key)
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseDraft};
    use chrono::Duration;

    fn record(category: &str, cents: i64, at: DateTime<Utc>) -> ExpenseRecord {
        ExpenseRecord::from_draft(
            ExpenseDraft::new(Money::from_cents(cents), category).at(at),
            Category::parse(category).unwrap(),
        )
    }

    #[test]
    fn test_total_ignores_case_and_other_categories() {
        let now = Utc::now();
        let mut ledger = ExpenseLedger::new();
        ledger.add(record("Food", 1250, now));
        ledger.add(record("food", 750, now));
        ledger.add(record("Fuel", 4000, now));

        assert_eq!(ledger.total_for("FOOD", SpendWindow::All).cents(), 2000);
        assert_eq!(ledger.total_for("Fuel", SpendWindow::All).cents(), 4000);
        assert_eq!(ledger.total_for("Rent", SpendWindow::All), Money::zero());
    }

    #[test]
    fn test_add_then_remove_restores_total() {
        let now = Utc::now();
        let mut ledger = ExpenseLedger::new();
        ledger.add(record("Food", 1000, now));
        let before = ledger.total_for("Food", SpendWindow::All);

        let id = ledger.add(record("Food", 333, now)).id;
        assert_eq!(ledger.total_for("Food", SpendWindow::All).cents(), 1333);

        assert!(ledger.remove(id).is_some());
        assert_eq!(ledger.total_for("Food", SpendWindow::All), before);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut ledger = ExpenseLedger::new();
        let id = ledger.add(record("Food", 100, Utc::now())).id;
        assert!(ledger.remove(id).is_some());
        assert!(ledger.remove(id).is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_duplicates_are_distinct_entries() {
        let now = Utc::now();
        let mut ledger = ExpenseLedger::new();
        let a = ledger.add(record("Food", 500, now)).id;
        let b = ledger.add(record("Food", 500, now)).id;
        assert_ne!(a, b);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_windows() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
        let mut ledger = ExpenseLedger::new();
        ledger.add(record("Food", 100, now - Duration::days(30)));
        ledger.add(record("Food", 200, now - Duration::days(1)));
        ledger.add(record("Food", 400, now));

        assert_eq!(ledger.total_for("Food", SpendWindow::All).cents(), 700);
        assert_eq!(
            ledger
                .total_for("Food", SpendWindow::Since(now - Duration::days(2)))
                .cents(),
            600
        );
        assert_eq!(
            ledger
                .total_for("Food", SpendWindow::Between(now - Duration::days(2), now))
                .cents(),
            200
        );
        assert_eq!(
            ledger.total_for("Food", SpendPeriod::Month.window(now)).cents(),
            600
        );
    }

    #[test]
    fn test_uses_category() {
        let mut ledger = ExpenseLedger::new();
        ledger.add(record("Health", 100, Utc::now()));
        assert!(ledger.uses_category(" health"));
        assert!(!ledger.uses_category("Food"));
    }
}
