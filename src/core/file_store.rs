//! File store - append-only day-file log
//!
//! One `<YYYY-MM-DD>.md` file per calendar day under the project directory,
//! one memo per line.
//!
//! # Key Points
//! - Append-only: no update, no delete
//! - Writes fail loud: the error is logged and returned
//! - Aggregate reads fail quiet: errors are logged and yield empty results
//! - No locking; concurrent appends rely on the filesystem's append semantics

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use tracing::{debug, error, warn};

use super::entry::{MemoEntry, MemoType};
use super::error::Result;
use super::format::{format_date, format_memo_at, parse_line, timestamp_now, today};
use super::search::{sort_newest_first, FileSearchOptions};

/// Extension of day-files
pub const DAY_FILE_EXT: &str = "md";

/// Default window for [`FileMemoStore::read_recent_memos`]
pub const DEFAULT_RECENT_DAYS: u32 = 7;

/// Day-file memo store rooted at a project directory
#[derive(Debug, Clone)]
pub struct FileMemoStore {
    base_dir: PathBuf,
}

impl FileMemoStore {
    /// Open a store, creating the directory if needed
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir).map_err(|e| {
                error!(path = %base_dir.display(), error = %e, "failed to create memo directory");
                e
            })?;
        }
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the day-file for `date`
    pub fn day_file(&self, date: NaiveDate) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", format_date(date), DAY_FILE_EXT))
    }

    /// Append a plain memo to the day-file (today unless `date` is given)
    pub fn add_memo(&self, content: &str, date: Option<NaiveDate>) -> Result<MemoEntry> {
        self.append(content, None, date)
    }

    /// Append a memo in the `key(label): content` form
    pub fn add_typed_memo(
        &self,
        content: &str,
        memo_type: &MemoType,
        date: Option<NaiveDate>,
    ) -> Result<MemoEntry> {
        self.append(content, Some(memo_type), date)
    }

    fn append(
        &self,
        content: &str,
        memo_type: Option<&MemoType>,
        date: Option<NaiveDate>,
    ) -> Result<MemoEntry> {
        let date = date.unwrap_or_else(today);
        let path = self.day_file(date);
        let timestamp = timestamp_now();
        let line = format_memo_at(&timestamp, content, memo_type);

        let written = fs::create_dir_all(&self.base_dir).and_then(|_| {
            let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
            file.write_all(format!("{}\n", line).as_bytes())
        });

        if let Err(e) = written {
            error!(path = %path.display(), error = %e, "failed to append memo");
            return Err(e.into());
        }

        debug!(path = %path.display(), "memo appended");

        let entry = MemoEntry::new(timestamp, content, format_date(date));
        Ok(match memo_type {
            Some(t) => entry.with_type(&t.key, &t.label),
            None => entry,
        })
    }

    /// Read one day (today unless `date` is given), in file order.
    ///
    /// A missing day-file is an empty day. Read failures are logged and
    /// treated as empty.
    pub fn read_memos(&self, date: Option<NaiveDate>) -> Vec<MemoEntry> {
        let stem = format_date(date.unwrap_or_else(today));
        self.read_day(&stem)
    }

    fn read_day(&self, stem: &str) -> Vec<MemoEntry> {
        let path = self.base_dir.join(format!("{}.{}", stem, DAY_FILE_EXT));
        if !path.exists() {
            return Vec::new();
        }

        match fs::read_to_string(&path) {
            Ok(text) => parse_day(&text, stem),
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to read day-file");
                Vec::new()
            }
        }
    }

    /// Read `days` consecutive days ending today, newest first
    pub fn read_recent_memos(&self, days: u32) -> Vec<MemoEntry> {
        self.read_recent_memos_until(today(), days)
    }

    /// Read `days` consecutive days ending at `last_day`, newest first
    pub fn read_recent_memos_until(&self, last_day: NaiveDate, days: u32) -> Vec<MemoEntry> {
        let mut entries = Vec::new();
        for offset in 0..days {
            let Some(day) = last_day.checked_sub_signed(Duration::days(i64::from(offset))) else {
                break;
            };
            entries.extend(self.read_memos(Some(day)));
        }
        sort_newest_first(&mut entries);
        entries
    }

    /// Day-file stems in the project directory, sorted ascending
    pub fn list_days(&self) -> Result<Vec<String>> {
        let mut days = Vec::new();
        for item in fs::read_dir(&self.base_dir)? {
            let path = item?.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != DAY_FILE_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                days.push(stem.to_string());
            }
        }
        days.sort();
        Ok(days)
    }

    /// Search all day-files, newest first.
    ///
    /// Keeps entries whose content contains `query` (case-insensitive) and,
    /// when a tag is given, whose tags include it. A directory read failure
    /// yields an empty result.
    pub fn search_memos(&self, query: &str, options: &FileSearchOptions) -> Vec<MemoEntry> {
        let days = match self.list_days() {
            Ok(days) => days,
            Err(e) => {
                warn!(path = %self.base_dir.display(), error = %e, "failed to list day-files");
                return Vec::new();
            }
        };

        let mut found: Vec<MemoEntry> = days
            .iter()
            .filter(|stem| options.includes_day(stem))
            .flat_map(|stem| self.read_day(stem))
            .filter(|entry| options.matches(entry, query))
            .collect();

        sort_newest_first(&mut found);
        found
    }
}

/// Parse a day-file body.
///
/// Blank lines and lines without a bracketed timestamp are skipped.
pub fn parse_day(text: &str, date: &str) -> Vec<MemoEntry> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_line(line);
            if !parsed.has_timestamp() || parsed.content.is_empty() {
                debug!(line, "skipping line without memo prefix");
                return None;
            }
            let entry = MemoEntry::new(parsed.timestamp, parsed.content, date);
            Some(match (parsed.memo_type, parsed.label) {
                (Some(key), Some(label)) => entry.with_type(key, label),
                _ => entry,
            })
        })
        .collect()
}
