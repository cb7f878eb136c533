//! File I/O utilities with atomic writes
//!
//! A document is either fully replaced or left untouched: writes go to a
//! sibling temp file which is synced and then renamed over the target.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ZennyError;

/// Read JSON from a file, returning `None` if the file doesn't exist
pub fn read_json_optional<T, P>(path: P) -> Result<Option<T>, ZennyError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ZennyError::Persist(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| ZennyError::Persist(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ZennyError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ZennyError::Persist(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // same directory so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| ZennyError::Persist(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| ZennyError::Persist(format!("Failed to serialize document: {}", e)))?;

    writer
        .flush()
        .map_err(|e| ZennyError::Persist(format!("Failed to flush document: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ZennyError::Persist(format!("Failed to sync document: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ZennyError::Persist(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Delete a file, treating a missing file as already deleted
pub fn remove_file_if_exists<P: AsRef<Path>>(path: P) -> Result<(), ZennyError> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ZennyError::Persist(format!(
            "Failed to delete {}: {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let data: Option<Doc> = read_json_optional(&path).unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("doc.json");
        let doc = Doc {
            name: "alice".into(),
            value: 7,
        };

        write_json_atomic(&path, &doc).unwrap();
        assert!(!temp_dir.path().join("nested").join("doc.json.tmp").exists());

        let loaded: Option<Doc> = read_json_optional(&path).unwrap();
        assert_eq!(loaded, Some(doc));
    }

    #[test]
    fn test_corrupt_file_is_persist_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();

        let result: Result<Option<Doc>, _> = read_json_optional(&path);
        assert!(matches!(result, Err(ZennyError::Persist(_))));
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gone.json");
        assert!(remove_file_if_exists(&path).is_ok());

        fs::write(&path, "{}").unwrap();
        remove_file_if_exists(&path).unwrap();
        assert!(!path.exists());
    }
}
