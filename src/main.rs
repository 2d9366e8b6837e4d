//! jinfo CLI - Entry point
//!
//! Usage: jinfo [memo] | jinfo <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jinfo::cli::{Cli, Commands, Session};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Config is loaded once and handed to every command
    let mut session = Session::load(cli.config, cli.project)?;

    let result = match cli.command {
        None => jinfo::cli::add::run(cli.add, &session),
        Some(Commands::List(args)) => jinfo::cli::list::run(args, &session),
        Some(Commands::Search(args)) => jinfo::cli::search::run(args, &session),
        Some(Commands::Project(args)) => jinfo::cli::project::execute(args, &mut session),
        Some(Commands::Interactive) => jinfo::cli::add::run_interactive(&session),
        Some(Commands::Types) => jinfo::cli::types::run(&session),
        Some(Commands::Inbox(args)) => jinfo::cli::inbox::execute(args, &session).await,
    };

    if let Err(e) = &result {
        session.printer().error(&format!("{:#}", e));
        std::process::exit(1);
    }

    result
}
