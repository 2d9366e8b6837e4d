//! Memo - key-value store record
//!
//! # Key Properties
//! - **id**: ULID string (timestamp + random component, unique within a collection)
//! - **content**: trimmed, never empty
//! - **tags**: `#`-prefixed, first-occurrence order, no duplicates unless supplied
//! - **timestamp / created_at**: creation time, never changed by updates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use super::error::{MemoError, Result};
use super::tags::extract_unique_tags;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: String,

    pub content: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Creation time
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Memo {
    /// Build a memo from raw input, deriving tags from content when none are supplied
    pub fn new(content: &str, tags: Option<Vec<String>>) -> Result<Self> {
        let content = validate_content(content)?;
        let now = Utc::now();
        let tags = tags.unwrap_or_else(|| extract_unique_tags(&content));

        Ok(Self {
            id: generate_id(),
            content,
            tags,
            timestamp: now,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    /// Replace content and tags in place; id and creation times are preserved
    pub fn revise(&mut self, content: &str, tags: Option<Vec<String>>) -> Result<()> {
        let content = validate_content(content)?;
        self.tags = tags.unwrap_or_else(|| extract_unique_tags(&content));
        self.content = content;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl std::fmt::Display for Memo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.timestamp.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
            self.content
        )
    }
}

fn validate_content(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(MemoError::validation("memo content must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Timestamp-prefixed random id
pub fn generate_id() -> String {
    Ulid::new().to_string().to_lowercase()
}

/// Per-tag usage count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Summary over a memo collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoStats {
    pub total_memos: usize,
    /// Distinct tags across all memos
    pub total_tags: usize,
    /// At most ten, by count descending
    pub most_used_tags: Vec<TagCount>,
}
