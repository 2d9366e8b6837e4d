//! `jinfo types` command - list memo types usable with `--type`

use anyhow::Result;
use colored::Colorize;

use super::Session;

pub fn run(session: &Session) -> Result<()> {
    for memo_type in session.config.memo_types() {
        println!(
            "{} {} {}",
            memo_type.emoji,
            format!("{:<12}", memo_type.key)
                .color(memo_type.color.as_str())
                .bold(),
            memo_type.description
        );
    }
    Ok(())
}
