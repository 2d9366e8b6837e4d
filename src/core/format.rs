//! Day-file line format
//!
//! ```text
//! [2024-01-15 14:30:45] plain content #tag
//! [2024-01-15 14:30:45] task(Task): semantic content
//! ```
//!
//! Timestamps are local time, fixed width, so string order is chronological.

use std::sync::OnceLock;

use chrono::{Local, NaiveDate, NaiveDateTime};
use regex::Regex;

use super::entry::MemoType;

/// chrono format for the bracketed timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// chrono format for day-file stems
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static SEMANTIC_LINE: OnceLock<Regex> = OnceLock::new();
static PLAIN_LINE: OnceLock<Regex> = OnceLock::new();

// The timestamp group stops at the first `]` so brackets in content stay in content
#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn semantic_line() -> &'static Regex {
    SEMANTIC_LINE.get_or_init(|| {
        Regex::new(r"^\[([^\]]+)\]\s*(\w+)\(([^)]*)\):\s*(.*)$")
            .expect("static line pattern is valid")
    })
}

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn plain_line() -> &'static Regex {
    PLAIN_LINE.get_or_init(|| {
        Regex::new(r"^\[([^\]]+)\]\s*(.*)$").expect("static line pattern is valid")
    })
}

/// Fields recovered from one stored line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Empty when the line had no bracketed prefix
    pub timestamp: String,
    pub memo_type: Option<String>,
    pub label: Option<String>,
    pub content: String,
}

impl ParsedLine {
    pub fn has_timestamp(&self) -> bool {
        !self.timestamp.is_empty()
    }
}

/// Current local time as `YYYY-MM-DD HH:mm:ss`
pub fn timestamp_now() -> String {
    format_timestamp(&Local::now().naive_local())
}

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Render a line stamped with the current local time
pub fn format_memo(content: &str, memo_type: Option<&MemoType>) -> String {
    format_memo_at(&timestamp_now(), content, memo_type)
}

/// Render a line with an explicit timestamp string
pub fn format_memo_at(timestamp: &str, content: &str, memo_type: Option<&MemoType>) -> String {
    match memo_type {
        Some(t) => format!("[{}] {}({}): {}", timestamp, t.key, t.label, content),
        None => format!("[{}] {}", timestamp, content),
    }
}

/// Parse a stored line: semantic form, then plain form, then the whole line as content
pub fn parse_line(line: &str) -> ParsedLine {
    if let Some(caps) = semantic_line().captures(line) {
        return ParsedLine {
            timestamp: caps[1].to_string(),
            memo_type: Some(caps[2].to_string()),
            label: Some(caps[3].to_string()),
            content: caps[4].trim().to_string(),
        };
    }

    if let Some(caps) = plain_line().captures(line) {
        return ParsedLine {
            timestamp: caps[1].to_string(),
            memo_type: None,
            label: None,
            content: caps[2].trim().to_string(),
        };
    }

    ParsedLine {
        timestamp: String::new(),
        memo_type: None,
        label: None,
        content: line.trim().to_string(),
    }
}
