mod cli;
mod config;
mod storage;
mod tasks;
mod tui;

use crate::cli::ConfigCommand;
use clap::Parser;
use color_eyre::Result;
use taskboard_core::{
    record::tasks_from_records,
    storage::TaskStore,
    tasks::{Priority, Task, TaskStatus},
};
use taskboard_task::StoreTaskRepo;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Entry point wiring the CLI to the task board.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = cli::Cli::parse();
    let config = config::load()?;
    match cli.command.unwrap_or(cli::Command::Tui) {
        cli::Command::Tui => {
            let repo = StoreTaskRepo::new(storage::store_from_config(&config)?);
            tui::launch(&repo).await?
        }
        cli::Command::Version => print_version(),
        cli::Command::Health => run_health_check(&config).await?,
        cli::Command::Config(ConfigCommand::Init) => init_config(&config)?,
        cli::Command::Task(cmd) => tasks::handle(cmd, &config).await?,
    }

    Ok(())
}

fn init_tracing() {
    // Respect user-provided filters, default to info to avoid noisy stdout.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_version() {
    println!("taskboard {}", env!("CARGO_PKG_VERSION"));
}

/// Checks the task document can be read and that its directory accepts writes.
async fn run_health_check(config: &config::Config) -> Result<()> {
    let store = storage::store_from_config(config)?;
    let records = store
        .load()
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    let tasks = tasks_from_records(&records);
    println!(
        "Document: {} ({} tasks)",
        store.path().display(),
        tasks.len()
    );

    let probe = storage::probe_store(&store);
    let result = run_store_health(&probe).await;
    if let Err(err) = std::fs::remove_file(probe.path()) {
        warn!(%err, "failed to remove health probe");
    }
    result?;
    println!("Storage: ok");
    Ok(())
}

async fn run_store_health<S: TaskStore>(store: &S) -> Result<()> {
    let written = vec![probe_task()];
    store
        .save(&written)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    let records = store
        .load()
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    debug!(records = records.len(), "health probe read back");

    if tasks_from_records(&records) != written {
        color_eyre::eyre::bail!("storage round-trip failed");
    }
    Ok(())
}

fn init_config(config: &config::Config) -> Result<()> {
    let path = config::write_default_if_missing(config)?;
    println!("Config initialized at {}", path.display());
    Ok(())
}

fn probe_task() -> Task {
    Task {
        id: 1,
        title: "health probe".to_string(),
        description: "ok".to_string(),
        priority: Priority::Low,
        status: TaskStatus::Done,
        created_date: None,
        due_date: String::new(),
    }
}
