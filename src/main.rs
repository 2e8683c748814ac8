//! Notelink CLI - Command-line interface for the personal knowledge store

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use notelink::config;
use notelink::output::{self, OutputMode};
use notelink::render::GraphFormat;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "notelink")]
#[command(version)]
#[command(about = "Personal knowledge store - linked notes with keyword search and relation graphs")]
#[command(long_about = r#"
Notelink keeps notes in a local SQLite file. Each note has an id, free-text
content and a list of related note ids, which may point at notes that do not
exist yet.

Run without a subcommand to start the interactive menu.

Example usage:
  notelink insert r1 "hello world" --related r2,r3
  notelink search hello
  notelink graph --format dot | dot -Tpng -o notes.png
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and write a config file pointing at it
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Insert a new record
    Insert {
        /// Record id (must be unique)
        id: String,

        /// Record content
        content: String,

        /// Related ids, comma separated
        #[arg(short, long)]
        related: Option<String>,
    },

    /// Find records whose content contains a keyword (case-sensitive)
    Search {
        /// Keyword; empty matches every record
        #[arg(default_value = "")]
        keyword: String,
    },

    /// Delete a record by id
    Delete {
        /// Record id
        id: String,
    },

    /// List all records sorted by id
    List,

    /// Show one record with its relations
    Show {
        /// Record id
        id: String,
    },

    /// Render the relation graph
    Graph {
        /// Output format (text, dot, json)
        #[arg(short, long, default_value = "text")]
        format: GraphFormat,
    },

    /// Show statistics about the store
    Stats,

    /// Start the interactive menu
    Shell {
        /// How the Visualize entry renders the graph (text, dot, json)
        #[arg(long, default_value = "text")]
        graph_format: GraphFormat,
    },
}

fn emit_error(output_mode: OutputMode, err: &anyhow::Error) {
    let message = format!("{:#}", err);
    match output_mode {
        OutputMode::Human => notelink::ui::error(&message),
        OutputMode::Json => {
            if let Err(e) = output::write_error(&mut std::io::stdout().lock(), &message) {
                tracing::error!("Failed to write error envelope: {}", e);
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for listings and JSON
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = OutputMode::from_json_flag(cli.json);

    match run(cli, output_mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            emit_error(output_mode, &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let loaded = config::load_config(Some(&config_path))?;
    let database = config::resolve_database_path(cli.database.as_deref(), loaded.as_ref());

    let command = cli.command.unwrap_or(Commands::Shell {
        graph_format: GraphFormat::Text,
    });

    match command {
        Commands::Init { force } => {
            commands::run_init(&config_path, &database, force, output_mode)
        }
        Commands::Insert { id, content, related } => commands::with_store(&database, |store| {
            commands::run_insert(store, id, content, related.as_deref(), output_mode)
        }),
        Commands::Search { keyword } => commands::with_store(&database, |store| {
            commands::run_search(store, &keyword, output_mode)
        }),
        Commands::Delete { id } => commands::with_store(&database, |store| {
            commands::run_delete(store, &id, output_mode)
        }),
        Commands::List => commands::with_store(&database, |store| commands::run_list(store, output_mode)),
        Commands::Show { id } => commands::with_store(&database, |store| {
            commands::run_show(store, &id, output_mode)
        }),
        Commands::Graph { format } => commands::with_store(&database, |store| {
            commands::run_graph(store, format, output_mode)
        }),
        Commands::Stats => commands::with_store(&database, |store| {
            commands::run_stats(store, &database, output_mode)
        }),
        Commands::Shell { graph_format } => commands::with_store(&database, |store| {
            commands::run_shell(store, graph_format)
        }),
    }
}
