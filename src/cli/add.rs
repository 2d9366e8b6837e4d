//! `jinfo [MEMO]` and `jinfo interactive`
//!
//! Appends a memo to a project's day-file.
//!
//! # Usage
//! ```bash
//! jinfo "Lunch with Sam #people"
//! jinfo Fix the flaky test --type task
//! jinfo "Late entry" --date 2024-01-15
//! jinfo                          # prompts for the memo
//! jinfo i                        # choose project and type, then prompt
//! ```

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use super::Session;
use crate::core::entry::MemoType;
use crate::core::error::MemoError;
use crate::core::tags::{extract_tags, normalize_tag};

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Memo text (prompted for when omitted)
    pub memo: Vec<String>,

    /// Memo type key (note, task, idea, ...)
    #[arg(short = 't', long = "type")]
    pub memo_type: Option<String>,

    /// Day-file to append to (YYYY-MM-DD, default: today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

pub fn run(args: AddArgs, session: &Session) -> Result<()> {
    let memo_type = match &args.memo_type {
        Some(key) => Some(
            session
                .config
                .memo_type(key)
                .ok_or_else(|| MemoError::not_found(format!("memo type '{}'", key)))?,
        ),
        None => None,
    };

    let content = if args.memo.is_empty() {
        prompt_content()?
    } else {
        args.memo.join(" ")
    };

    write_memo(session, session.project.as_deref(), &content, memo_type.as_ref(), args.date)
}

pub fn run_interactive(session: &Session) -> Result<()> {
    if !console::user_attended() {
        bail!("Interactive mode needs a terminal");
    }
    let theme = ColorfulTheme::default();

    let names: Vec<&String> = session.config.projects.keys().collect();
    if names.is_empty() {
        bail!("No projects configured. Add one with 'jinfo project add <name> <path>'.");
    }
    let items: Vec<String> = names
        .iter()
        .map(|name| format!("{} - {}", name, session.config.projects[*name].description))
        .collect();
    let default_index = names
        .iter()
        .position(|n| **n == session.config.default_project)
        .unwrap_or(0);
    let project = Select::with_theme(&theme)
        .with_prompt("Project")
        .items(&items)
        .default(default_index)
        .interact()?;

    let types = session.config.memo_types();
    let mut type_items = vec!["(none)".to_string()];
    type_items.extend(types.iter().map(|t| format!("{} - {}", t, t.description)));
    let picked = Select::with_theme(&theme)
        .with_prompt("Memo type")
        .items(&type_items)
        .default(0)
        .interact()?;
    let memo_type = picked.checked_sub(1).map(|i| types[i].clone());

    let content = prompt_content()?;
    write_memo(session, Some(names[project].as_str()), &content, memo_type.as_ref(), None)
}

fn prompt_content() -> Result<String> {
    if !console::user_attended() {
        bail!("No memo given. Pass the memo as an argument or run in a terminal.");
    }
    let content: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Please add memo")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.trim().is_empty() {
                Err("Memo content is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(content)
}

fn write_memo(
    session: &Session,
    project: Option<&str>,
    content: &str,
    memo_type: Option<&MemoType>,
    date: Option<NaiveDate>,
) -> Result<()> {
    if content.trim().is_empty() {
        bail!("Memo content is required");
    }
    let content = with_default_tags(content.trim(), &session.config.preferences.default_tags);

    let store = session.store_for(project)?;
    let entry = match memo_type {
        Some(t) => store.add_typed_memo(&content, t, date),
        None => store.add_memo(&content, date),
    }
    .context("Failed to add memo")?;

    session.printer().success(&format!("Memo added: {}", entry));
    Ok(())
}

/// Append configured default tags that the content does not already carry
fn with_default_tags(content: &str, defaults: &[String]) -> String {
    let present = extract_tags(content);
    let missing: Vec<String> = defaults
        .iter()
        .map(|t| normalize_tag(t))
        .filter(|t| t.len() > 1 && !present.contains(t))
        .collect();

    if missing.is_empty() {
        content.to_string()
    } else {
        format!("{} {}", content, missing.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tags_appended_once() {
        let defaults = vec!["daily".to_string(), "#work".to_string()];
        assert_eq!(with_default_tags("standup", &defaults), "standup #daily #work");
        assert_eq!(
            with_default_tags("standup #work", &defaults),
            "standup #work #daily"
        );
    }

    #[test]
    fn test_no_default_tags() {
        assert_eq!(with_default_tags("plain", &[]), "plain");
    }
}
