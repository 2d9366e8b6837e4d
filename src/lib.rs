//! jinfo - timestamped daily memos
//!
//! Append-only day-file log for the command line, plus a key-value memo
//! collection with update, delete, search and stats.
//!
//! ## Key Concepts
//!
//! - **Day-file**: `<YYYY-MM-DD>.md`, one `[timestamp] content` line per memo
//! - **Project**: a named directory of day-files
//! - **Tag**: `#word` tokens extracted from content
//! - **Memo type**: optional `key(label):` prefix (note, task, idea, ...)

pub mod cli;
pub mod config;
pub mod core;

pub use config::Config;
pub use core::entry::{MemoEntry, MemoType};
pub use core::error::{MemoError, Result};
pub use core::file_store::FileMemoStore;
pub use core::kv::{JsonFileKv, KeyValueStore, MemoryKv};
pub use core::kv_store::{KvMemoStore, MemoExport};
pub use core::memo::{Memo, MemoStats, TagCount};
pub use core::search::{FileSearchOptions, MemoQuery};
pub use core::tags::{extract_tags, extract_unique_tags};
