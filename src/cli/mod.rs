//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::core::file_store::FileMemoStore;
use crate::core::kv::JsonFileKv;
use crate::core::kv_store::KvMemoStore;

pub mod add;
pub mod inbox;
pub mod list;
pub mod output;
pub mod project;
pub mod search;
pub mod types;

use output::Printer;

/// jinfo - timestamped daily memos
///
/// Run with a memo to append it to today's file, or use a subcommand.
#[derive(Parser, Debug)]
#[command(name = "jinfo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "JINFO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project to use (default: the configured default project)
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    #[command(flatten)]
    pub add: add::AddArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List memos for a day or the last N days
    List(list::ListArgs),

    /// Search memos across all days
    Search(search::SearchArgs),

    /// Manage projects
    Project(project::ProjectArgs),

    /// Add a memo interactively (choose project and type)
    #[command(alias = "i")]
    Interactive,

    /// Show configured memo types
    Types,

    /// Key-value memo collection (editable, with stats and export)
    Inbox(inbox::InboxArgs),
}

/// Config loaded once per invocation, plus where it came from
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub project: Option<String>,
}

impl Session {
    /// Load (or bootstrap) the config at `path`, or at `~/.jinfo/config.json`
    pub fn load(path: Option<PathBuf>, project: Option<String>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Config::global_config_path()
                .context("Could not determine home directory for ~/.jinfo/config.json")?,
        };
        let config = Config::load_or_init(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?;

        Ok(Self {
            config,
            config_path,
            project,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.config
            .save_to(&self.config_path)
            .with_context(|| format!("Failed to save config {}", self.config_path.display()))
    }

    pub fn printer(&self) -> Printer {
        Printer::new(self.config.preferences.color_scheme.clone())
    }

    /// Day-file store of the selected project
    pub fn store(&self) -> Result<FileMemoStore> {
        self.store_for(self.project.as_deref())
    }

    pub fn store_for(&self, name: Option<&str>) -> Result<FileMemoStore> {
        let project = self.config.project(name)?;
        Ok(FileMemoStore::open(&project.path)?)
    }

    /// Key-value memo store next to the config file
    pub fn inbox(&self) -> KvMemoStore<JsonFileKv> {
        KvMemoStore::new(JsonFileKv::new(Config::inbox_path(&self.config_path)))
    }
}
