//! `jinfo list` command
//!
//! # Usage
//! ```bash
//! jinfo list                    # last 7 days, newest first
//! jinfo list --recent 30
//! jinfo list --date 2024-01-15  # one day, in file order
//! ```

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use super::output::print_entries;
use super::Session;
use crate::core::file_store::DEFAULT_RECENT_DAYS;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show a single day (YYYY-MM-DD)
    #[arg(short, long, conflicts_with = "recent")]
    pub date: Option<NaiveDate>,

    /// Show the last N days ending today
    #[arg(short, long, default_value_t = DEFAULT_RECENT_DAYS)]
    pub recent: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs, session: &Session) -> Result<()> {
    let store = session.store()?;

    let entries = match args.date {
        Some(date) => store.read_memos(Some(date)),
        None => store.read_recent_memos(args.recent),
    };

    if entries.is_empty() && !args.json {
        session.printer().info("No memos found");
        return Ok(());
    }

    print_entries(&entries, args.json)
}
