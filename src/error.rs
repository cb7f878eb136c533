//! Custom error types for Zenny
//!
//! This module defines the error hierarchy for the budget engine using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Zenny operations
#[derive(Error, Debug)]
pub enum ZennyError {
    /// A category with the same name (ignoring case) already exists
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    /// The category is still referenced by at least one expense
    #[error("Category '{category}' is in use by existing expenses")]
    CategoryInUse { category: String },

    /// Non-numeric, negative or otherwise unusable amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Alert threshold outside of (0, 100]
    #[error("Invalid threshold: {0} (must be greater than 0 and at most 100)")]
    InvalidThreshold(f64),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The document store call failed or timed out
    #[error("Persistence error: {0}")]
    Persist(String),

    /// No signed-in user for a store operation
    #[error("No authenticated user")]
    NotAuthenticated,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl ZennyError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for savings goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Goal",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for ZennyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Zenny operations
pub type ZennyResult<T> = Result<T, ZennyError>;
