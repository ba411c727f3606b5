//! CLI definitions and entry point

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use log::debug;

use super::commands;
use sprintboard::adapters::DocumentStore;
use sprintboard::config::Config;
use sprintboard::core::models::OwnerId;
use sprintboard::output::OutputMode;
use sprintboard::service::Tracker;

/// sprintboard - Kanban boards with ordered columns and derived progress
#[derive(Parser, Debug)]
#[command(
    name = "sprintboard",
    version,
    about = "Kanban boards with ordered columns and derived progress",
    long_about = "Track sprints as boards of tasks in four columns.\n\n\
                  Tasks keep their drag-and-drop order within each column, and\n\
                  each board's progress follows from how many of its tasks are done."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Act as this owner (defaults to [owner] default in the config)
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Config file (defaults to ~/.sprintboard/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage boards
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Show usage statistics
    Stats,

    /// Check boards' task sets and rebuild them from task statuses
    Repair {
        /// Board id or title (all boards when omitted)
        board: Option<String>,

        /// Only report, do not rewrite anything
        #[arg(long)]
        check: bool,
    },

    /// Serve the HTTP API
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Worker threads (overrides config)
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum BoardAction {
    /// List boards in order
    List,

    /// Create a board
    Create {
        /// Board title
        title: String,

        /// Board description
        #[arg(short, long)]
        description: String,

        /// Priority: low, medium, high, urgent
        #[arg(short, long, default_value = "low")]
        priority: String,
    },

    /// Show a board with its columns
    Show {
        /// Board id or title
        board: String,
    },

    /// Change a board's title, description or priority
    Update {
        /// Board id or title
        board: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New priority
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Delete a board and all of its tasks
    Delete {
        /// Board id or title
        board: String,
    },

    /// Move one board next to another
    Move {
        /// Board id or title
        board: String,

        /// Place directly below this board
        #[arg(long)]
        after: Option<String>,

        /// Place directly above this board
        #[arg(long)]
        before: Option<String>,
    },

    /// Put boards in the given order (every board must be listed)
    Reorder {
        /// Board ids or titles, first to last
        #[arg(required = true)]
        boards: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskAction {
    /// Add a task to the end of its column
    Add {
        /// Board id or title
        board: String,

        /// Task title
        title: String,

        /// Task description
        #[arg(short, long)]
        description: String,

        /// Priority: low, medium, high, urgent
        #[arg(short, long, default_value = "low")]
        priority: String,

        /// Starting status
        #[arg(short, long, default_value = "todo")]
        status: String,

        /// Planned start (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        start: Option<String>,

        /// Deadline (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
    },

    /// Show a task
    Show {
        /// Task id or label (e.g. KAN-3)
        task: String,
    },

    /// Change some of a task's fields
    Update {
        /// Task id or label
        task: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New priority
        #[arg(short, long)]
        priority: Option<String>,

        /// New status
        #[arg(short, long)]
        status: Option<String>,

        /// New planned start
        #[arg(long)]
        start: Option<String>,

        /// New deadline
        #[arg(long)]
        due: Option<String>,
    },

    /// Move a task within or across columns
    Move {
        /// Task id or label
        task: String,

        /// Destination column
        status: String,

        /// Place directly below this task
        #[arg(long)]
        after: Option<String>,

        /// Place directly above this task
        #[arg(long)]
        before: Option<String>,
    },

    /// Put a column's tasks in the given order
    Reorder {
        /// Board id or title
        board: String,

        /// Column status
        status: String,

        /// Task ids or labels, top to bottom
        #[arg(required = true)]
        tasks: Vec<String>,
    },

    /// Delete one or more tasks
    Delete {
        /// Task ids or labels
        #[arg(required = true)]
        tasks: Vec<String>,
    },
}

/// Everything a command needs
#[derive(Debug)]
pub struct Context {
    /// The tracker over the configured store
    pub tracker: Arc<Tracker<DocumentStore>>,
    /// Acting owner
    pub owner: OwnerId,
    /// Output mode
    pub mode: OutputMode,
    /// Loaded configuration
    pub config: Config,
}

impl Context {
    fn load(
        config_path: Option<&Path>,
        owner: Option<String>,
        mode: OutputMode,
    ) -> anyhow::Result<Self> {
        let config = Config::load(config_path)?;
        // relative data files sit next to the config that names them
        let base = config_path
            .and_then(Path::parent)
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let data_file = config.data_file(&base);
        debug!("Using data file {}", data_file.display());

        let store = DocumentStore::open(&data_file)
            .with_context(|| format!("Failed to open {}", data_file.display()))?;
        let tracker = Tracker::new(store).with_label_prefix(config.tasks.label_prefix.clone());
        let owner = OwnerId::new(owner.unwrap_or_else(|| config.owner.default.clone()));

        Ok(Self {
            tracker: Arc::new(tracker),
            owner,
            mode,
            config,
        })
    }
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let command = match cli.command {
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!("{}", serde_json::json!({ "version": sprintboard::VERSION }));
            } else {
                println!("sprintboard v{}", sprintboard::VERSION);
            }
            return Ok(());
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": sprintboard::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("sprintboard v{}", sprintboard::VERSION);
                println!("\nRun 'sprintboard --help' for usage");
                println!("Run 'sprintboard board create <title> -d <description>' to get started");
            }
            return Ok(());
        },
        Some(command) => command,
    };

    let ctx = Context::load(cli.config.as_deref(), cli.owner, output_mode)?;
    match command {
        Command::Board { action } => commands::board(action, &ctx),
        Command::Task { action } => commands::task(action, &ctx),
        Command::Stats => commands::stats(&ctx),
        Command::Repair { board, check } => commands::repair(board.as_deref(), check, &ctx),
        Command::Serve {
            host,
            port,
            workers,
        } => commands::serve(host, port, workers, &ctx),
        Command::Version => Ok(()),
    }
}
