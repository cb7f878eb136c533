//! Budget registry
//!
//! Maps each category to its [`BudgetEntry`]. Lookups ignore case; the
//! spelling from the first time a category was budgeted is kept for display
//! and persistence.
//!
//! User edits go through [`BudgetRegistry::set_entry`], which always returns
//! the entry to [`AlertState::Unalerted`]: a fresh budgeting decision makes
//! the category eligible for one new alert. The only other writer of the
//! alert state is the threshold evaluator.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::{ZennyError, ZennyResult};
use crate::models::budget::validate_threshold;
use crate::models::{AlertState, BudgetEntry, Category, CategoryKey, Money};

#[derive(Debug, Clone)]
struct Slot {
    name: String,
    entry: BudgetEntry,
}

/// Per-category budgets for one user
#[derive(Debug, Clone, Default)]
pub struct BudgetRegistry {
    entries: BTreeMap<CategoryKey, Slot>,
}

impl BudgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the persisted `budgets` object
    ///
    /// Keys that collide once case is ignored keep the first entry in map
    /// order. Entries with invalid values are replaced by defaults, keeping
    /// their alert state.
    pub fn from_map(map: BTreeMap<String, BudgetEntry>) -> Self {
        let mut registry = Self::new();
        for (name, mut entry) in map {
            let key = CategoryKey::new(&name);
            if key.as_str().is_empty() {
                warn!("ignoring budget entry with a blank category name");
                continue;
            }
            if registry.entries.contains_key(&key) {
                warn!(category = %name, "ignoring budget entry that differs only by case");
                continue;
            }
            if let Err(e) = entry.validate() {
                warn!(category = %name, error = %e, "resetting invalid budget entry");
                entry = BudgetEntry {
                    state: entry.state,
                    ..BudgetEntry::default()
                };
            }
            registry.entries.insert(
                key,
                Slot {
                    name: name.trim().to_string(),
                    entry,
                },
            );
        }
        registry
    }

    /// Create or overwrite a category's limit and threshold
    pub fn set_entry(
        &mut self,
        category: &str,
        amount: Money,
        threshold: f64,
    ) -> ZennyResult<BudgetEntry> {
        let name = category.trim();
        if name.is_empty() {
            return Err(ZennyError::Validation(
                "Category name cannot be empty".into(),
            ));
        }
        Self::check_amount(name, amount)?;
        validate_threshold(threshold).map_err(|_| ZennyError::InvalidThreshold(threshold))?;

        let entry = BudgetEntry::new(amount, threshold);
        let slot = self
            .entries
            .entry(CategoryKey::new(name))
            .or_insert_with(|| Slot {
                name: name.to_string(),
                entry: BudgetEntry::default(),
            });
        slot.entry = entry.clone();

        Ok(entry)
    }

    /// Reject limits that are negative or larger than [`Money::MAX`]
    pub fn check_amount(category: &str, amount: Money) -> ZennyResult<()> {
        if amount.is_negative() {
            return Err(ZennyError::InvalidAmount(format!(
                "budget for '{}' cannot be negative ({})",
                category.trim(),
                amount
            )));
        }
        if !amount.is_within_limit() {
            return Err(ZennyError::InvalidAmount(format!(
                "budget for '{}' exceeds the maximum of {}",
                category.trim(),
                Money::MAX
            )));
        }
        Ok(())
    }

        /// Remove a category's entry; absent entries are ignored
    pub fn delete_entry(&mut self, category: &str) -> Option<BudgetEntry> {
        self.entries
            .remove(&CategoryKey::new(category))
            .map(|slot| slot.entry)
    }

    /// Insert a default entry for every category that lacks one
    ///
    /// Returns the number of entries created.
    pub fn ensure_defaults(&mut self, categories: &[Category]) -> usize {
        let mut created = 0;
        for category in categories {
            self.entries.entry(category.key()).or_insert_with(|| {
                created += 1;
                Slot {
                    name: category.name().to_string(),
                    entry: BudgetEntry::default(),
                }
            });
        }
        created
    }

    /// Drop every entry
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, category: &str) -> Option<&BudgetEntry> {
        self.entries
            .get(&CategoryKey::new(category))
            .map(|slot| &slot.entry)
    }

    /// Move an entry to `Alerted`
    ///
    /// Returns false when there is no entry or it was already alerted.
    pub(crate) fn mark_alerted(&mut self, category: &str) -> bool {
        match self.entries.get_mut(&CategoryKey::new(category)) {
            Some(slot) if !slot.entry.state.is_alerted() => {
                slot.entry.state = AlertState::Alerted;
                true
            }
            _ => false,
        }
    }

    /// Entries with their display names, ordered by key
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BudgetEntry)> {
        self.entries
            .values()
            .map(|slot| (slot.name.as_str(), &slot.entry))
    }

    /// Persisted form, keyed by display name
    pub fn to_map(&self) -> BTreeMap<String, BudgetEntry> {
        self.iter()
            .map(|(name, entry)| (name.to_string(), entry.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
