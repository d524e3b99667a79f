//! focustrack - Pomodoro-style study timer CLI
//!
//! Main entry point for the focustrack application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use focustrack::cli::{Cli, Commands};
use focustrack::commands;
use focustrack::config::Config;
use focustrack::session::SessionStore;
use focustrack::storage;
use focustrack::tasks::TaskStore;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse_args();

    // Mirror a CLI storage path into FOCUSTRACK_DB so the resolver picks
    // it up ahead of the configured path.
    if let Some(db_path) = &cli.storage_path {
        std::env::set_var(storage::DB_ENV_VAR, db_path);
        tracing::debug!("Using storage DB override: {}", db_path);
    }

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    let db_path = storage::resolve_db_path(config.storage.path.as_deref())?;
    let store = SessionStore::new_with_path(&db_path)?;

    match cli.command {
        Commands::Focus { minutes } => {
            commands::focus::run_focus(&config, &store, minutes).await?;
        }
        Commands::Break { long, minutes } => {
            commands::breaks::run_break(&config, &store, long, minutes).await?;
        }
        Commands::Report => {
            commands::report::run_report(&store);
        }
        Commands::History { command } => {
            commands::history::handle_history(command, &store)?;
        }
        Commands::Tasks { command } => {
            let task_store = TaskStore::new_with_path(&db_path)?;
            commands::tasks::handle_tasks(command, &task_store)?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("focustrack=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
