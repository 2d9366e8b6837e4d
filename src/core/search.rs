//! Search - filter engine shared by both memo stores
//!
//! Linear scans only: keyword is a case-insensitive substring match,
//! tags are exact membership, multiple tags use AND logic.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};

use super::entry::MemoEntry;
use super::format::format_date;
use super::memo::{Memo, MemoStats, TagCount};

/// Number of entries reported in `MemoStats::most_used_tags`
pub const TOP_TAGS: usize = 10;

/// Case-insensitive substring match
pub fn matches_keyword(content: &str, keyword: &str) -> bool {
    content.to_lowercase().contains(&keyword.to_lowercase())
}

/// True when every required tag is present
pub fn has_all_tags(tags: &[String], required: &[String]) -> bool {
    required.iter().all(|r| tags.contains(r))
}

/// Filters for the key-value store
#[derive(Debug, Default, Clone)]
pub struct MemoQuery {
    /// Case-insensitive substring of content
    pub keyword: Option<String>,

    /// Single required tag (exact, including `#`)
    pub tag: Option<String>,

    /// Required tags (AND logic)
    pub tags: Vec<String>,

    /// Inclusive lower bound on the creation date (local calendar day)
    pub from_date: Option<NaiveDate>,

    /// Inclusive upper bound on the creation date (local calendar day)
    pub to_date: Option<NaiveDate>,
}

impl MemoQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.from_date = Some(date);
        self
    }

    pub fn to_date(mut self, date: NaiveDate) -> Self {
        self.to_date = Some(date);
        self
    }

    pub fn matches(&self, memo: &Memo) -> bool {
        if let Some(keyword) = &self.keyword {
            if !matches_keyword(&memo.content, keyword) {
                return false;
            }
        }

        if let Some(tag) = &self.tag {
            if !memo.has_tag(tag) {
                return false;
            }
        }

        if !has_all_tags(&memo.tags, &self.tags) {
            return false;
        }

        if self.from_date.is_some() || self.to_date.is_some() {
            let day = memo.timestamp.with_timezone(&Local).date_naive();
            if self.from_date.is_some_and(|from| day < from) {
                return false;
            }
            if self.to_date.is_some_and(|to| day > to) {
                return false;
            }
        }

        true
    }

    /// Keep matching memos in their stored order
    pub fn apply(&self, memos: Vec<Memo>) -> Vec<Memo> {
        memos.into_iter().filter(|m| self.matches(m)).collect()
    }
}

/// Filters for day-file search
#[derive(Debug, Default, Clone)]
pub struct FileSearchOptions {
    /// Tag name with or without the leading `#`
    pub tag: Option<String>,

    /// Skip day-files whose stem sorts before this date
    pub from_date: Option<NaiveDate>,

    /// Skip day-files whose stem sorts after this date
    pub to_date: Option<NaiveDate>,
}

impl FileSearchOptions {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.from_date = Some(date);
        self
    }

    pub fn to_date(mut self, date: NaiveDate) -> Self {
        self.to_date = Some(date);
        self
    }

    /// Lexicographic bound check on a day-file stem
    pub fn includes_day(&self, stem: &str) -> bool {
        if let Some(from) = self.from_date {
            if stem < format_date(from).as_str() {
                return false;
            }
        }
        if let Some(to) = self.to_date {
            if stem > format_date(to).as_str() {
                return false;
            }
        }
        true
    }

    pub fn matches(&self, entry: &MemoEntry, query: &str) -> bool {
        if !matches_keyword(&entry.content, query) {
            return false;
        }
        match &self.tag {
            Some(tag) => {
                let wanted = format!("#{}", tag.trim_start_matches('#'));
                entry.tags.contains(&wanted)
            }
            None => true,
        }
    }
}

/// Newest first; fixed-width timestamps make string order chronological
pub fn sort_newest_first(entries: &mut [MemoEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Count memos and tag usage.
///
/// Ties in `most_used_tags` keep the order in which each tag was first seen
/// while walking the collection (stable sort over first-appearance order).
pub fn tag_stats(memos: &[Memo]) -> MemoStats {
    let mut order: Vec<TagCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for memo in memos {
        for tag in &memo.tags {
            match index.get(tag.as_str()) {
                Some(&i) => order[i].count += 1,
                None => {
                    index.insert(tag.as_str(), order.len());
                    order.push(TagCount {
                        tag: tag.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    let total_tags = order.len();
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(TOP_TAGS);

    MemoStats {
        total_memos: memos.len(),
        total_tags,
        most_used_tags: order,
    }
}
