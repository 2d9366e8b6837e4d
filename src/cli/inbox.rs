//! `jinfo inbox` command
//!
//! Editable memo collection stored as one JSON array next to the config
//! (`~/.jinfo/inbox.json`). Unlike day-files, inbox memos have ids and can be
//! edited or removed.
//!
//! # Usage
//! ```bash
//! jinfo inbox add "Read the RFC #reading"
//! jinfo inbox list
//! jinfo inbox edit 01hq3k2jn5... "Read the RFC twice #reading"
//! jinfo inbox rm 01hq3k2jn5...
//! jinfo inbox search --tags reading,rust --from 2024-01-01
//! jinfo inbox stats
//! jinfo inbox export -o backup.json
//! jinfo inbox import backup.json
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;

use super::Session;
use crate::core::memo::Memo;
use crate::core::search::MemoQuery;
use crate::core::tags::normalize_tag;

#[derive(Args, Debug)]
pub struct InboxArgs {
    #[command(subcommand)]
    pub command: InboxCommands,
}

#[derive(Subcommand, Debug)]
pub enum InboxCommands {
    /// Add a memo (tags are taken from the text unless --tags is given)
    Add {
        /// Memo text
        #[arg(required = true)]
        content: Vec<String>,

        /// Explicit tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },

    /// List all memos
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace a memo's text (and tags)
    Edit {
        /// Memo id
        id: String,

        /// New text
        #[arg(required = true)]
        content: Vec<String>,

        /// Explicit tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },

    /// Delete a memo
    Rm {
        /// Memo id
        id: String,
    },

    /// Filter memos
    Search {
        /// Text to look for (case-insensitive)
        keyword: Option<String>,

        /// Required tags (comma-separated, AND logic)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// First creation day to include (YYYY-MM-DD)
        #[arg(short, long)]
        from: Option<NaiveDate>,

        /// Last creation day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Memo and tag counts
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write all memos to a JSON export file
    Export {
        /// Output file (default: jinfo-export-<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add memos from an export file, skipping ids already present
    Import {
        /// Export file
        file: PathBuf,
    },

    /// Delete every memo
    Clear {
        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

pub async fn execute(args: InboxArgs, session: &Session) -> Result<()> {
    let inbox = session.inbox();
    let printer = session.printer();

    match args.command {
        InboxCommands::Add { content, tags } => {
            let memo = inbox
                .add_memo(&content.join(" "), normalize_tags(tags))
                .await?;
            printer.success(&format!("Memo added: {}", memo.id));
        }
        InboxCommands::List { json } => {
            let memos = inbox.get_all_memos().await?;
            print_memos(&memos, json, || printer.info("Inbox is empty"))?;
        }
        InboxCommands::Edit { id, content, tags } => {
            inbox
                .update_memo(&id, &content.join(" "), normalize_tags(tags))
                .await?;
            printer.success(&format!("Memo updated: {}", id));
        }
        InboxCommands::Rm { id } => {
            inbox.delete_memo(&id).await?;
            printer.success(&format!("Memo deleted: {}", id));
        }
        InboxCommands::Search {
            keyword,
            tags,
            from,
            to,
            json,
        } => {
            let query = MemoQuery {
                keyword,
                tag: None,
                tags: normalize_tags(tags).unwrap_or_default(),
                from_date: from,
                to_date: to,
            };
            let memos = inbox.search_memos_advanced(&query).await?;
            print_memos(&memos, json, || printer.info("No matching memos"))?;
        }
        InboxCommands::Stats { json } => {
            let stats = inbox.get_stats().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("📊 Inbox Statistics\n");
                println!("  Total memos:  {}", stats.total_memos);
                println!("  Distinct tags: {}", stats.total_tags);
                if !stats.most_used_tags.is_empty() {
                    println!("\n🏷  Most used tags:");
                    for tag in &stats.most_used_tags {
                        println!("  {:<20} {}", tag.tag, tag.count);
                    }
                }
            }
        }
        InboxCommands::Export { output } => {
            let export = inbox.export().await?;
            let path = output.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "jinfo-export-{}.json",
                    Utc::now().format("%Y-%m-%d")
                ))
            });
            std::fs::write(&path, serde_json::to_string_pretty(&export)?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            printer.success(&format!(
                "Exported {} memo(s) to {}",
                export.memos.len(),
                path.display()
            ));
        }
        InboxCommands::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let added = inbox.import(&json).await?;
            printer.success(&format!("Imported {} memo(s)", added));
        }
        InboxCommands::Clear { yes } => {
            if !yes {
                if !console::user_attended() {
                    bail!("Refusing to clear without --yes when not attached to a terminal");
                }
                let confirmed = Confirm::new()
                    .with_prompt("Delete every inbox memo? This cannot be undone")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    printer.info("Nothing deleted");
                    return Ok(());
                }
            }
            inbox.clear().await?;
            printer.success("All inbox memos deleted");
        }
    }

    Ok(())
}

fn normalize_tags(tags: Option<Vec<String>>) -> Option<Vec<String>> {
    tags.map(|tags| {
        tags.iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| normalize_tag(t))
            .collect()
    })
}

fn print_memos(memos: &[Memo], json: bool, on_empty: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(memos)?);
        return Ok(());
    }
    if memos.is_empty() {
        on_empty();
        return Ok(());
    }
    for memo in memos {
        println!("{}  {}", memo.id.dimmed(), memo);
        if !memo.tags.is_empty() {
            println!("    {}", memo.tags.join(" ").cyan());
        }
    }
    Ok(())
}
