//! `jinfo project` command
//!
//! # Usage
//! ```bash
//! jinfo project list
//! jinfo project add work ~/notes/work -d "Work log"
//! jinfo project default work
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::Session;

#[derive(Args, Debug)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects
    List,

    /// Register a project directory
    Add {
        /// Project name
        name: String,

        /// Directory holding the day-files (created if missing)
        path: PathBuf,

        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Set the default project
    Default {
        /// Project name
        name: String,
    },
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Path")]
    path: String,
}

pub fn execute(args: ProjectArgs, session: &mut Session) -> Result<()> {
    match args.command {
        ProjectCommands::List => list(session),
        ProjectCommands::Add {
            name,
            path,
            description,
        } => {
            session
                .config
                .add_project(&name, path, description.as_deref())?;
            session.save()?;
            session
                .printer()
                .success(&format!("Project '{}' added", name));
            Ok(())
        }
        ProjectCommands::Default { name } => {
            session.config.set_default_project(&name)?;
            session.save()?;
            session
                .printer()
                .success(&format!("Default project set to '{}'", name));
            Ok(())
        }
    }
}

fn list(session: &Session) -> Result<()> {
    let rows: Vec<ProjectRow> = session
        .config
        .projects
        .iter()
        .map(|(name, project)| ProjectRow {
            marker: if *name == session.config.default_project {
                "*"
            } else {
                ""
            },
            name: name.clone(),
            description: project.description.clone(),
            path: project.path.display().to_string(),
        })
        .collect();

    if rows.is_empty() {
        session.printer().info("No projects configured");
        return Ok(());
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    Ok(())
}
