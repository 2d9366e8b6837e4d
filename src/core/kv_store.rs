//! Key-value memo store
//!
//! The whole collection lives under one key (`"memos"`) as a JSON array.
//! Every mutation is a full read-modify-write round trip with no locking or
//! versioning, so concurrent writers race and the last whole-array write wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::error::{MemoError, Result};
use super::kv::KeyValueStore;
use super::memo::{Memo, MemoStats};
use super::search::{tag_stats, MemoQuery};

/// Key holding the memo collection
pub const MEMOS_KEY: &str = "memos";

/// Version written into export documents
pub const EXPORT_VERSION: &str = "1.0.0";

/// Export document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoExport {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub memos: Vec<Memo>,
}

/// Memo CRUD and search over a [`KeyValueStore`]
pub struct KvMemoStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> KvMemoStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Create a memo; tags default to the de-duplicated tags in `content`
    pub async fn add_memo(&self, content: &str, tags: Option<Vec<String>>) -> Result<Memo> {
        let memo = Memo::new(content, tags)?;
        let mut memos = self.get_all_memos().await?;
        memos.push(memo.clone());
        self.save_memos(&memos).await?;
        debug!(id = %memo.id, "memo added");
        Ok(memo)
    }

    /// The stored collection, empty if nothing was saved yet
    pub async fn get_all_memos(&self) -> Result<Vec<Memo>> {
        match self.backend.get(MEMOS_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn get_memo(&self, id: &str) -> Result<Memo> {
        self.get_all_memos()
            .await?
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| MemoError::not_found(format!("memo {}", id)))
    }

    /// Replace content and tags of an existing memo
    pub async fn update_memo(
        &self,
        id: &str,
        content: &str,
        tags: Option<Vec<String>>,
    ) -> Result<Memo> {
        let mut memos = self.get_all_memos().await?;
        let memo = memos
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| MemoError::not_found(format!("memo {}", id)))?;
        memo.revise(content, tags)?;
        let updated = memo.clone();

        self.save_memos(&memos).await?;
        debug!(id, "memo updated");
        Ok(updated)
    }

    pub async fn delete_memo(&self, id: &str) -> Result<()> {
        let mut memos = self.get_all_memos().await?;
        let index = memos
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| MemoError::not_found(format!("memo {}", id)))?;
        memos.remove(index);

        self.save_memos(&memos).await?;
        debug!(id, "memo deleted");
        Ok(())
    }

    /// Remove every memo
    pub async fn clear(&self) -> Result<()> {
        self.backend.remove(MEMOS_KEY).await
    }

    /// Case-insensitive keyword search
    pub async fn search_memos(&self, keyword: &str) -> Result<Vec<Memo>> {
        self.search_memos_advanced(&MemoQuery::new().with_keyword(keyword))
            .await
    }

    /// Memos carrying `tag` (exact, including `#`)
    pub async fn search_memos_by_tag(&self, tag: &str) -> Result<Vec<Memo>> {
        self.search_memos_advanced(&MemoQuery::new().with_tag(tag))
            .await
    }

    /// Memos carrying every tag in `tags`
    pub async fn search_memos_by_tags(&self, tags: &[String]) -> Result<Vec<Memo>> {
        self.search_memos_advanced(&MemoQuery::new().with_tags(tags.to_vec()))
            .await
    }

    /// Keyword, tag, multi-tag and inclusive date-range filters combined
    pub async fn search_memos_advanced(&self, query: &MemoQuery) -> Result<Vec<Memo>> {
        Ok(query.apply(self.get_all_memos().await?))
    }

    pub async fn get_stats(&self) -> Result<MemoStats> {
        Ok(tag_stats(&self.get_all_memos().await?))
    }

    pub async fn export(&self) -> Result<MemoExport> {
        Ok(MemoExport {
            version: EXPORT_VERSION.to_string(),
            export_date: Utc::now(),
            memos: self.get_all_memos().await?,
        })
    }

    /// Import an export document.
    ///
    /// Records whose `id` already exists are skipped; the rest are added as
    /// new memos with fresh ids. Returns the number added.
    pub async fn import(&self, json: &str) -> Result<usize> {
        let doc: Value = serde_json::from_str(json)?;
        let records = doc
            .get("memos")
            .and_then(Value::as_array)
            .ok_or_else(|| MemoError::validation("import file has no memos array"))?;
        let incoming: Vec<Memo> = serde_json::from_value(Value::Array(records.clone()))?;

        let mut memos = self.get_all_memos().await?;
        let mut added = 0;
        for record in incoming {
            if memos.iter().any(|m| m.id == record.id) {
                continue;
            }
            memos.push(Memo::new(&record.content, Some(record.tags))?);
            added += 1;
        }

        if added > 0 {
            self.save_memos(&memos).await?;
        }
        info!(added, "memos imported");
        Ok(added)
    }

    async fn save_memos(&self, memos: &[Memo]) -> Result<()> {
        let json = serde_json::to_string(memos)?;
        self.backend.set(MEMOS_KEY, json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kv::MemoryKv;

    fn store() -> KvMemoStore<MemoryKv> {
        KvMemoStore::new(MemoryKv::new())
    }

    #[tokio::test]
    async fn test_empty_store() -> Result<()> {
        let store = store();
        assert!(store.get_all_memos().await?.is_empty());
        assert_eq!(store.get_stats().await?, MemoStats::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_empty_is_rejected_and_not_persisted() -> Result<()> {
        let store = store();
        assert!(matches!(store.add_memo("", None).await, Err(MemoError::Validation(_))));
        assert!(matches!(store.add_memo("  ", None).await, Err(MemoError::Validation(_))));
        assert_eq!(store.backend().get(MEMOS_KEY).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_memo_not_found() {
        let store = store();
        assert!(matches!(store.get_memo("nope").await, Err(MemoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_missing_leaves_collection() -> Result<()> {
        let store = store();
        store.add_memo("one", None).await?;
        assert!(matches!(
            store.update_memo("missing", "x", None).await,
            Err(MemoError::NotFound(_))
        ));
        assert_eq!(store.get_all_memos().await?[0].content, "one");
        Ok(())
    }

    #[tokio::test]
    async fn test_clear() -> Result<()> {
        let store = store();
        store.add_memo("one", None).await?;
        store.clear().await?;
        assert!(store.get_all_memos().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_import_requires_memos_array() {
        let store = store();
        assert!(matches!(
            store.import(r#"{"version":"1.0.0"}"#).await,
            Err(MemoError::Validation(_))
        ));
        assert!(matches!(
            store.import(r#"{"memos":{}}"#).await,
            Err(MemoError::Validation(_))
        ));
    }
}
