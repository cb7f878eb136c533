//! Category names and their case-insensitive keys
//!
//! A category is stored with the spelling the user typed, but every
//! comparison, map lookup and ledger filter goes through [`CategoryKey`], so
//! "Food", "food" and " FOOD " all name the same category.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a category name, in characters
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// Categories every new user starts with
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Other",
];

/// Normalized comparison key for a category name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&Category> for CategoryKey {
    fn from(category: &Category) -> Self {
        Self::new(category.name())
    }
}

/// A user-facing category label
///
/// Deserialization runs the same checks as [`Category::parse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Build a category from user input, trimming surrounding whitespace
    pub fn parse(name: &str) -> Result<Self, CategoryValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        let len = name.chars().count();
        if len > MAX_CATEGORY_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(len));
        }
        Ok(Self(name.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn key(&self) -> CategoryKey {
        CategoryKey::from(self)
    }

    /// Case-insensitive match against another spelling
    pub fn matches(&self, other: &str) -> bool {
        self.key() == CategoryKey::new(other)
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Category {}

impl TryFrom<String> for Category {
    type Error = CategoryValidationError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::parse(&name)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validation errors for category names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let category = Category::parse("  Dining Out ").unwrap();
        assert_eq!(category.name(), "Dining Out");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(Category::parse(""), Err(CategoryValidationError::EmptyName));
        assert_eq!(
            Category::parse(" \t\n"),
            Err(CategoryValidationError::EmptyName)
        );
    }

    #[test]
    fn test_parse_rejects_long_names() {
        let long = "x".repeat(MAX_CATEGORY_NAME_LEN + 1);
        assert_eq!(
            Category::parse(&long),
            Err(CategoryValidationError::NameTooLong(MAX_CATEGORY_NAME_LEN + 1))
        );
    }

    #[test]
    fn test_case_insensitive_equality() {
        let a = Category::parse("Food").unwrap();
        let b = Category::parse("FOOD").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.key(), CategoryKey::new(" food "));
        assert!(a.matches("fOoD"));
        assert!(!a.matches("Foods"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let category = Category::parse("Health").unwrap();
        assert_eq!(serde_json::to_string(&category).unwrap(), "\"Health\"");
    }

    #[test]
    fn test_deserialize_validates() {
        let category: Category = serde_json::from_str("\" Food \"").unwrap();
        assert_eq!(category.name(), "Food");

        assert!(serde_json::from_str::<Category>("\"   \"").is_err());

        let long = format!("\"{}\"", "x".repeat(MAX_CATEGORY_NAME_LEN + 1));
        let err = serde_json::from_str::<Category>(&long).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_defaults_are_valid_and_distinct() {
        let mut keys: Vec<_> = DEFAULT_CATEGORIES
            .iter()
            .map(|name| Category::parse(name).unwrap().key())
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), DEFAULT_CATEGORIES.len());
    }
}
