//! `jinfo search` command
//!
//! Searches every day-file of a project.
//!
//! # Usage
//! ```bash
//! jinfo search "deploy"
//! jinfo search "" --tag work
//! jinfo search "review" --from 2024-01-01 --to 2024-01-31
//! ```
//!
//! Results are newest first. Matching is a case-insensitive substring test.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use super::output::print_entries;
use super::Session;
use crate::core::search::FileSearchOptions;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive)
    pub query: String,

    /// Only memos carrying this tag (with or without '#')
    #[arg(short, long)]
    pub tag: Option<String>,

    /// First day to include (YYYY-MM-DD)
    #[arg(short, long)]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SearchArgs, session: &Session) -> Result<()> {
    let store = session.store()?;

    let options = FileSearchOptions {
        tag: args.tag,
        from_date: args.from,
        to_date: args.to,
    };
    let entries = store.search_memos(&args.query, &options);

    if entries.is_empty() && !args.json {
        session.printer().info("No matching memos");
        return Ok(());
    }

    print_entries(&entries, args.json)
}
