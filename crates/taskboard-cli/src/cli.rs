use clap::{Args, Parser, Subcommand};

/// CLI surface definition.
#[derive(Parser, Debug)]
#[command(
    name = "taskboard",
    about = "Single-user task board backed by a JSON file",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Optional subcommand; defaults to launching the TUI when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch the interactive board (press q or Esc to exit).
    Tui,
    /// Print version and exit.
    Version,
    /// Check that the task document location is readable and writable.
    Health,
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Create, list, advance and delete tasks.
    #[command(subcommand)]
    Task(TaskCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// List tasks, optionally filtered, followed by board statistics.
    List(ListArgs),
    /// Add a task.
    Add {
        /// Task title (required, surrounding whitespace is ignored).
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// low, medium or high; anything else becomes medium.
        #[arg(short, long, default_value = "medium")]
        priority: String,
        /// Deadline as YYYY-MM-DD.
        #[arg(long, default_value = "")]
        due: String,
    },
    /// Move a task to its next status (todo -> in_progress -> done -> todo).
    Advance {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        id: u64,
    },
    /// Delete a task.
    Delete {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        id: u64,
    },
    /// Print totals, completion rate and overdue count.
    Stats,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// Keyword matched against title and description.
    #[arg(short, long, default_value = "")]
    pub query: String,
    /// Only tasks with this status.
    #[arg(short, long)]
    pub status: Option<String>,
    /// Only tasks with this priority.
    #[arg(short, long)]
    pub priority: Option<String>,
}
