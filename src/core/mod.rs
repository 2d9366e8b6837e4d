//! Core module - Business logic
//!
//! Memo formats, the two stores and the shared search engine.

pub mod entry;
pub mod error;
pub mod file_store;
pub mod format;
pub mod kv;
pub mod kv_store;
pub mod memo;
pub mod search;
pub mod tags;
