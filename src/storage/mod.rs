//! Document storage for Zenny
//!
//! The engine persists one JSON document per user through the
//! [`DocumentStore`] trait. Two implementations ship with the crate: an
//! in-memory store and a directory of JSON files written atomically.
//!
//! Saves use top-level merge: keys present in the incoming document replace
//! the stored ones, other stored keys are kept. Concurrent writers from
//! different devices race and the last write wins.

pub mod file_io;
pub mod json_store;
pub mod memory;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ZennyResult;
use crate::models::UserId;

/// External per-user document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the user's document, `None` if it has never been written
    async fn get(&self, user: &UserId) -> ZennyResult<Option<Value>>;

    /// Write the user's document, merging top-level keys when `merge` is set
    async fn set(&self, user: &UserId, document: Value, merge: bool) -> ZennyResult<()>;

    /// Remove the user's document; missing documents are not an error
    async fn delete(&self, user: &UserId) -> ZennyResult<()>;
}

/// Merge `incoming` into `existing` key by key at the top level
///
/// Non-object values replace the existing document outright.
pub fn merge_documents(existing: Option<Value>, incoming: Value) -> Value {
    match (existing, incoming) {
        (Some(Value::Object(mut base)), Value::Object(update)) => {
            for (key, value) in update {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (_, incoming) => incoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_overwrites_top_level_keys_only() {
        let existing = json!({ "receipts": [1, 2], "budgets": { "Food": 1 }, "extra": true });
        let incoming = json!({ "budgets": { "Rent": 2 } });

        let merged = merge_documents(Some(existing), incoming);
        assert_eq!(
            merged,
            json!({ "receipts": [1, 2], "budgets": { "Rent": 2 }, "extra": true })
        );
    }

    #[test]
    fn test_merge_without_existing() {
        let incoming = json!({ "categories": ["Food"] });
        assert_eq!(merge_documents(None, incoming.clone()), incoming);
    }
}
