use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lanes")]
#[command(
    author,
    version,
    about = "A kanban task board with XML project files"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .lanes.toml by default)
    #[arg(long, global = true, env = "LANES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true, env = "LANES_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project file with the configured columns
    #[command(visible_alias = "new")]
    Init {
        /// Project file to write
        file: PathBuf,

        /// Project name (defaults to board.default_project_name)
        #[arg(long)]
        name: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Create a task in the project's first column
    #[command(visible_alias = "add", visible_alias = "c")]
    Create {
        /// Project file
        file: PathBuf,

        /// Title of the task
        title: String,

        /// Description text
        #[arg(short = 'd', long)]
        description: Option<String>,

        /// Assignee (repeatable)
        #[arg(short = 'a', long = "assignee")]
        assignees: Vec<String>,

        /// Due date (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move a task between columns (by name, or zero-based index)
    #[command(name = "move", visible_alias = "mv")]
    Move {
        /// Project file
        file: PathBuf,

        /// Task ID
        id: String,

        /// Source column; an exact name wins over an index
        from: String,

        /// Destination column; an exact name wins over an index
        to: String,
    },

    /// Show the columns of a project and the tasks in them
    #[command(visible_alias = "ls")]
    Show {
        /// Project file
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a task's movement history
    History {
        /// Project file
        file: PathBuf,

        /// Task ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
