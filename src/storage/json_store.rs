//! Directory-of-files document store
//!
//! Each user's document lives in `<data_dir>/<user>.json`. File work runs on
//! the blocking pool. The write lock is taken inside the blocking task, so a
//! write whose caller timed out still finishes before the next one starts.
//! Such a write may land after its caller was told the save failed.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ZennyError, ZennyResult};
use crate::models::UserId;

use super::file_io::{read_json_optional, remove_file_if_exists, write_json_atomic};
use super::{merge_documents, DocumentStore};

/// JSON files on local disk
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a user's document; unsafe characters are hex-escaped
    pub fn document_path(&self, user: &UserId) -> PathBuf {
        let mut file_name = String::with_capacity(user.as_str().len() + 5);
        for byte in user.as_str().bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                file_name.push(byte as char);
            } else {
                file_name.push_str(&format!("%{:02x}", byte));
            }
        }
        file_name.push_str(".json");
        self.dir.join(file_name)
    }
}

async fn blocking<T, F>(f: F) -> ZennyResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> ZennyResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ZennyError::Persist(format!("store task failed: {}", e)))?
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn get(&self, user: &UserId) -> ZennyResult<Option<Value>> {
        let path = self.document_path(user);
        blocking(move || read_json_optional(&path)).await
    }

    async fn set(&self, user: &UserId, document: Value, merge: bool) -> ZennyResult<()> {
        let path = self.document_path(user);
        let lock = Arc::clone(&self.write_lock);
        blocking(move || {
            let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let next = if merge {
                merge_documents(read_json_optional(&path)?, document)
            } else {
                document
            };
            write_json_atomic(&path, &next)
        })
        .await
    }

    async fn delete(&self, user: &UserId) -> ZennyResult<()> {
        let path = self.document_path(user);
        let lock = Arc::clone(&self.write_lock);
        blocking(move || {
            let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            remove_file_if_exists(&path)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip_with_merge() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("data"));
        let user = UserId::new("alice").unwrap();

        assert!(store.get(&user).await.unwrap().is_none());

        store
            .set(&user, json!({ "categories": ["Food"] }), true)
            .await
            .unwrap();
        store
            .set(&user, json!({ "budgets": {} }), true)
            .await
            .unwrap();

        let doc = store.get(&user).await.unwrap().unwrap();
        assert_eq!(doc, json!({ "categories": ["Food"], "budgets": {} }));
        assert!(store.document_path(&user).exists());

        store.delete(&user).await.unwrap();
        assert!(store.get(&user).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_merges_are_serialized() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::new(temp_dir.path()));
        let user = UserId::new("alice").unwrap();

        let mut tasks = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            let user = user.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .set(&user, json!({ format!("key{}", i): i }), true)
                    .await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let doc = store.get(&user).await.unwrap().unwrap();
        assert_eq!(doc.as_object().unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_abandoned_write_still_completes_before_next() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path());
        let user = UserId::new("alice").unwrap();

        // hold the lock so the first write queues inside its blocking task
        let held = store.write_lock.lock().unwrap();
        let abandoned = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            store.set(&user, json!({ "first": 1 }), true),
        )
        .await;
        assert!(abandoned.is_err());
        drop(held);

        let mut landed = false;
        for _ in 0..100 {
            if store.get(&user).await.unwrap().is_some() {
                landed = true;
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(landed);

        store.set(&user, json!({ "second": 2 }), true).await.unwrap();

        let doc = store.get(&user).await.unwrap().unwrap();
        assert_eq!(doc, json!({ "first": 1, "second": 2 }));
    }

    #[test]
    fn test_document_path_escapes() {
        let store = JsonFileStore::new("/tmp/zenny");
        let user = UserId::new("a/b@c").unwrap();
        let path = store.document_path(&user);
        assert_eq!(path.file_name().unwrap(), "a%2fb%40c.json");
    }
}
