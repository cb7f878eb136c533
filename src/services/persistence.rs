//! Persistence bridge
//!
//! Converts between [`UserData`] and the store's JSON documents for the
//! signed-in user. Every store call is bounded by a timeout; an elapsed
//! timeout is reported as [`ZennyError::Persist`] like any other store
//! failure. A timed-out call is abandoned rather than cancelled, so the
//! store may still complete a save that was reported as failed. Without a
//! user every call returns
//! [`ZennyError::NotAuthenticated`] and touches nothing.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{ZennyError, ZennyResult};
use crate::models::{UserData, UserId};
use crate::storage::DocumentStore;

/// Result of loading a user's document
#[derive(Debug, Clone)]
pub struct Loaded {
    pub data: UserData,
    /// No document existed; the caller should run first-time setup
    pub first_time: bool,
}

/// Bridge between session state and the external document store
#[derive(Clone)]
pub struct PersistenceBridge {
    store: Arc<dyn DocumentStore>,
    user: Option<UserId>,
    timeout: Duration,
}

impl PersistenceBridge {
    pub fn new(store: Arc<dyn DocumentStore>, user: Option<UserId>, timeout: Duration) -> Self {
        Self {
            store,
            user,
            timeout,
        }
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    fn require_user(&self) -> ZennyResult<&UserId> {
        self.user.as_ref().ok_or(ZennyError::NotAuthenticated)
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> ZennyResult<T>
    where
        F: Future<Output = ZennyResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(ZennyError::Persist(format!(
                "{} timed out after {}ms",
                operation,
                self.timeout.as_millis()
            ))),
        }
    }

    /// Merge the snapshot into the user's document
    pub async fn save(&self, data: &UserData) -> ZennyResult<()> {
        let user = self.require_user()?;
        let document = serde_json::to_value(data)?;

        self.bounded("save", self.store.set(user, document, true))
            .await?;
        debug!(user = %user, receipts = data.receipts.len(), "saved user data");
        Ok(())
    }

    /// Load the user's document, hydrating defaults when none exists
    pub async fn load(&self) -> ZennyResult<Loaded> {
        let user = self.require_user()?;
        let document = self.bounded("load", self.store.get(user)).await?;

        match document {
            Some(document) => {
                let data: UserData = serde_json::from_value(document).map_err(|e| {
                    ZennyError::Persist(format!("Stored document is malformed: {}", e))
                })?;
                Ok(Loaded {
                    data,
                    first_time: false,
                })
            }
            None => {
                info!(user = %user, "no stored document, starting fresh");
                let now = Utc::now();
                Ok(Loaded {
                    data: UserData {
                        created_at: Some(now),
                        updated_at: Some(now),
                        ..UserData::default()
                    },
                    first_time: true,
                })
            }
        }
    }

    /// Remove the user's document
    pub async fn delete(&self) -> ZennyResult<()> {
        let user = self.require_user()?;
        self.bounded("delete", self.store.delete(user)).await
    }
}

impl std::fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceBridge")
            .field("user", &self.user)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
