//! In-process document store

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{ZennyError, ZennyResult};
use crate::models::UserId;

use super::{merge_documents, DocumentStore};

/// Documents kept in a map; can be switched to fail every call
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<UserId, Value>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call return a `Persist` error (or stop doing so)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> ZennyResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ZennyError::Persist("store unavailable".into()))
        } else {
            Ok(())
        }
    }

    /// Raw stored document, bypassing the failure switch
    pub async fn document(&self, user: &UserId) -> Option<Value> {
        self.documents.read().await.get(user).cloned()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, user: &UserId) -> ZennyResult<Option<Value>> {
        self.check()?;
        Ok(self.documents.read().await.get(user).cloned())
    }

    async fn set(&self, user: &UserId, document: Value, merge: bool) -> ZennyResult<()> {
        self.check()?;
        let mut documents = self.documents.write().await;
        let next = if merge {
            merge_documents(documents.remove(user), document)
        } else {
            document
        };
        documents.insert(user.clone(), next);
        Ok(())
    }

    async fn delete(&self, user: &UserId) -> ZennyResult<()> {
        self.check()?;
        self.documents.write().await.remove(user);
        Ok(())
    }
}
