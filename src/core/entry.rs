//! MemoEntry and MemoType - day-file log records
//!
//! A `MemoEntry` is one line of a `<YYYY-MM-DD>.md` day-file. It has no
//! persisted id: identity is the line's position in its file.

use serde::{Deserialize, Serialize};

use super::tags::extract_tags;

/// A parsed day-file line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoEntry {
    /// `YYYY-MM-DD HH:mm:ss`, empty for lines without a bracketed prefix
    pub timestamp: String,

    pub content: String,

    /// Re-derived from `content` on read, duplicates preserved
    pub tags: Vec<String>,

    /// Day-file stem this entry was read from
    pub date: String,

    /// Memo type key when the line uses the `key(label): content` form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<String>,

    /// Parenthesised field of the semantic form (label or emoji)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl MemoEntry {
    pub fn new(timestamp: impl Into<String>, content: impl Into<String>, date: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            timestamp: timestamp.into(),
            tags: extract_tags(&content),
            content,
            date: date.into(),
            memo_type: None,
            label: None,
        }
    }

    pub fn with_type(mut self, memo_type: impl Into<String>, label: impl Into<String>) -> Self {
        self.memo_type = Some(memo_type.into());
        self.label = Some(label.into());
        self
    }
}

impl std::fmt::Display for MemoEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.memo_type, &self.label) {
            (Some(key), Some(label)) => {
                write!(f, "[{}] {}({}): {}", self.timestamp, key, label, self.content)
            }
            _ => write!(f, "[{}] {}", self.timestamp, self.content),
        }
    }
}

/// Semantic category for interactive entries (note, task, idea, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoType {
    pub key: String,
    pub label: String,
    pub description: String,
    pub emoji: String,
    pub color: String,
}

impl MemoType {
    pub fn new(key: &str, label: &str, description: &str, emoji: &str, color: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            emoji: emoji.to_string(),
            color: color.to_string(),
        }
    }

    /// Built-in types written into a freshly bootstrapped config
    pub fn defaults() -> Vec<MemoType> {
        vec![
            MemoType::new("note", "Note", "General notes and records", "📝", "gray"),
            MemoType::new("task", "Task", "Things to do and work items", "✅", "blue"),
            MemoType::new("idea", "Idea", "New ideas and inspiration", "💡", "yellow"),
            MemoType::new("meeting", "Meeting", "Meeting minutes and content", "🤝", "purple"),
            MemoType::new("learning", "Learning", "Things learned and insights", "📚", "green"),
            MemoType::new("issue", "Issue", "Problems to be solved", "⚠️", "red"),
            MemoType::new("progress", "Progress", "Work progress and status reports", "📈", "cyan"),
            MemoType::new("reflection", "Reflection", "Retrospectives and summaries", "🤔", "magenta"),
            MemoType::new("decision", "Decision", "Decisions and policies", "⚡", "orange"),
            MemoType::new("reference", "Reference", "Reference material and links", "🔗", "teal"),
        ]
    }
}

impl std::fmt::Display for MemoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.emoji, self.label, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let entry = MemoEntry::new("2024-01-15 14:30:45", "ship", "2024-01-15").with_type("task", "Task");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["memoType"], "task");
        assert!(json.get("memo_type").is_none());
    }

    #[test]
    fn test_new_derives_tags_with_duplicates() {
        let entry = MemoEntry::new("2024-01-15 14:30:45", "#a then #b then #a", "2024-01-15");
        assert_eq!(entry.tags, vec!["#a", "#b", "#a"]);
        assert!(entry.memo_type.is_none());
    }

    #[test]
    fn test_display_plain_and_typed() {
        let entry = MemoEntry::new("2024-01-15 14:30:45", "Ship it", "2024-01-15");
        assert_eq!(entry.to_string(), "[2024-01-15 14:30:45] Ship it");

        let typed = entry.with_type("task", "Task");
        assert_eq!(typed.to_string(), "[2024-01-15 14:30:45] task(Task): Ship it");
    }

    #[test]
    fn test_default_types_have_unique_keys() {
        let types = MemoType::defaults();
        assert_eq!(types.len(), 10);
        let mut keys: Vec<_> = types.iter().map(|t| t.key.as_str()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 10);
        assert_eq!(types[0].key, "note");
    }
}
