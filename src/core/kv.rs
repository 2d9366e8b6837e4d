//! Key-value backends
//!
//! ```text
//! ┌──────────────────────────────┐
//! │        KeyValueStore         │
//! │  ┌──────────┬─────────────┐  │
//! │  │ MemoryKv │ JsonFileKv  │  │
//! │  │(HashMap) │(one JSON    │  │
//! │  │          │ object file)│  │
//! │  └──────────┴─────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! Values are whole JSON documents stored as strings. There is no locking:
//! every `set` replaces the value, last writer wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, error};

use super::error::{MemoError, Result};

/// Backend trait for string-keyed persisted state
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Drop the value under `key` (no-op when absent)
    async fn remove(&self, key: &str) -> Result<()>;
}

/// In-process backend
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| MemoError::Io(std::io::Error::other(format!("Lock error: {}", e))))
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// File backend: a single JSON object, one property per key
#[derive(Debug, Clone)]
pub struct JsonFileKv {
    path: PathBuf,
}

impl JsonFileKv {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, Value>> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Map::new());
        }
        let text = tokio::fs::read_to_string(&self.path).await?;
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(MemoError::validation(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }

    async fn store(&self, map: Map<String, Value>) -> Result<()> {
        let text = serde_json::to_string_pretty(&Value::Object(map))?;
        let written = async {
            if let Some(parent) = self.path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&self.path, text).await
        }
        .await;

        if let Err(e) = written {
            error!(path = %self.path.display(), error = %e, "failed to write key-value file");
            return Err(e.into());
        }
        debug!(path = %self.path.display(), "key-value file written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.load().await?;
        map.get(key)
            .map(serde_json::to_string)
            .transpose()
            .map_err(MemoError::from)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let parsed: Value = serde_json::from_str(&value)?;
        let mut map = self.load().await?;
        map.insert(key.to_string(), parsed);
        self.store(map).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.load().await?;
        if map.remove(key).is_some() {
            self.store(map).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_kv() -> Result<()> {
        let kv = MemoryKv::new();
        assert_eq!(kv.get("k").await?, None);
        kv.set("k", "[1]".to_string()).await?;
        assert_eq!(kv.get("k").await?.as_deref(), Some("[1]"));
        kv.remove("k").await?;
        assert_eq!(kv.get("k").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_json_file_kv_persists_across_instances() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("state.json");

        JsonFileKv::new(&path).set("memos", "[1,2]".to_string()).await?;
        JsonFileKv::new(&path).set("other", "{\"a\":true}".to_string()).await?;

        let kv = JsonFileKv::new(&path);
        assert_eq!(kv.get("memos").await?.as_deref(), Some("[1,2]"));
        assert_eq!(kv.get("other").await?.as_deref(), Some("{\"a\":true}"));
        assert_eq!(kv.get("missing").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_json_file_kv_missing_file_is_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let kv = JsonFileKv::new(dir.path().join("none.json"));
        assert_eq!(kv.get("memos").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_json_file_kv_rejects_non_json_value() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonFileKv::new(dir.path().join("state.json"));
        assert!(kv.set("memos", "not json".to_string()).await.is_err());
    }
}
