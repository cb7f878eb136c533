//! Category store
//!
//! Owns the user's category names. Names are unique ignoring case, and a
//! category that any expense still references cannot be removed.

use tracing::debug;

use crate::error::{ZennyError, ZennyResult};
use crate::models::{Category, CategoryKey, DEFAULT_CATEGORIES};

use super::budgets::BudgetRegistry;
use super::ledger::ExpenseLedger;

/// The set of categories in use, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    categories: Vec<Category>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted list, dropping case-insensitive duplicates
    pub fn from_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut store = Self::new();
        for category in categories {
            if store.contains(category.name()) {
                debug!(category = %category, "dropping duplicate category on load");
                continue;
            }
            store.categories.push(category);
        }
        store
    }

    /// Add the built-in categories that are not present yet
    pub fn seed_defaults(&mut self) {
        for name in DEFAULT_CATEGORIES {
            if !self.contains(name) {
                if let Ok(category) = Category::parse(name) {
                    self.categories.push(category);
                }
            }
        }
    }

    /// Add a new category
    pub fn add(&mut self, name: &str) -> ZennyResult<Category> {
        let category =
            Category::parse(name).map_err(|e| ZennyError::Validation(e.to_string()))?;

        if let Some(existing) = self.get(category.name()) {
            return Err(ZennyError::DuplicateCategory(existing.name().to_string()));
        }

        self.categories.push(category.clone());
        Ok(category)
    }

    /// Remove a category that no expense uses, cascading to its budget entry
    ///
    /// Returns the removed category with its stored spelling.
    pub fn remove(
        &mut self,
        name: &str,
        ledger: &ExpenseLedger,
        budgets: &mut BudgetRegistry,
    ) -> ZennyResult<Category> {
        let key = CategoryKey::new(name);
        let index = self
            .categories
            .iter()
            .position(|c| c.key() == key)
            .ok_or_else(|| ZennyError::category_not_found(name.trim()))?;

        if ledger.uses_category(name) {
            return Err(ZennyError::CategoryInUse {
                category: self.categories[index].name().to_string(),
            });
        }

        let removed = self.categories.remove(index);
        budgets.delete_entry(removed.name());
        Ok(removed)
    }

    /// Look up a category by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&Category> {
        let key = CategoryKey::new(name);
        self.categories.iter().find(|c| c.key() == key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn list(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn clear(&mut self) {
        self.categories.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseDraft, ExpenseRecord, Money};

    fn expense(category: &str, units: i64) -> ExpenseRecord {
        ExpenseRecord::from_draft(
            ExpenseDraft::new(Money::from_units(units), category),
            Category::parse(category).unwrap(),
        )
    }

    #[test]
    fn test_add_category() {
        let mut store = CategoryStore::new();
        let category = store.add("  Groceries ").unwrap();
        assert_eq!(category.name(), "Groceries");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_duplicate_ignores_case() {
        let mut store = CategoryStore::new();
        store.add("Food").unwrap();

        let result = store.add("FOOD");
        assert!(matches!(result, Err(ZennyError::DuplicateCategory(ref n)) if n == "Food"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_blank_rejected() {
        let mut store = CategoryStore::new();
        assert!(matches!(store.add("   "), Err(ZennyError::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_in_use_is_blocked() {
        let mut store = CategoryStore::new();
        let mut budgets = BudgetRegistry::new();
        let mut ledger = ExpenseLedger::new();
        store.add("Food").unwrap();
        budgets.ensure_defaults(store.list());
        ledger.add(expense("food", 10));

        let result = store.remove("Food", &ledger, &mut budgets);
        assert!(matches!(
            result,
            Err(ZennyError::CategoryInUse { ref category }) if category == "Food"
        ));
        assert!(store.contains("Food"));
        assert!(budgets.get("Food").is_some());
    }

    #[test]
    fn test_remove_cascades_to_budget() {
        let mut store = CategoryStore::new();
        let mut budgets = BudgetRegistry::new();
        let ledger = ExpenseLedger::new();
        store.add("Travel").unwrap();
        budgets
            .set_entry("Travel", Money::from_units(300), 80.0)
            .unwrap();

        let removed = store.remove("travel", &ledger, &mut budgets).unwrap();
        assert_eq!(removed.name(), "Travel");
        assert!(!store.contains("Travel"));
        assert!(budgets.get("Travel").is_none());
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let mut store = CategoryStore::new();
        let mut budgets = BudgetRegistry::new();
        let ledger = ExpenseLedger::new();
        let err = store.remove("Nope", &ledger, &mut budgets).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_seed_defaults_is_idempotent() {
        let mut store = CategoryStore::new();
        store.add("food").unwrap();
        store.seed_defaults();
        store.seed_defaults();

        assert_eq!(store.len(), DEFAULT_CATEGORIES.len());
        assert_eq!(store.get("Food").unwrap().name(), "food");
    }

    #[test]
    fn test_from_categories_drops_duplicates() {
        let store = CategoryStore::from_categories(vec![
            Category::parse("Bills").unwrap(),
            Category::parse("bills").unwrap(),
        ]);
        assert_eq!(store.len(), 1);
    }
}
