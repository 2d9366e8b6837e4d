//! Terminal status lines
//!
//! `✓ success`, `✗ error` and `ℹ info`, coloured from
//! `preferences.colorScheme`.

use colored::Colorize;

use crate::config::ColorScheme;
use crate::core::entry::MemoEntry;

#[derive(Debug, Clone, Default)]
pub struct Printer {
    scheme: ColorScheme,
}

impl Printer {
    pub fn new(scheme: ColorScheme) -> Self {
        Self { scheme }
    }

    pub fn success(&self, message: &str) {
        println!("{}", format!("✓ {}", message).color(self.scheme.success.as_str()));
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", format!("✗ {}", message).color(self.scheme.error.as_str()));
    }

    pub fn info(&self, message: &str) {
        println!("{}", format!("ℹ {}", message).color(self.scheme.info.as_str()));
    }
}

/// Print day-file entries as stored lines, or as JSON
pub fn print_entries(entries: &[MemoEntry], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }
    for entry in entries {
        println!("{}", entry);
    }
    Ok(())
}
