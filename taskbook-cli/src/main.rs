use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use taskbook_core::{JsonFileStore, MemoryStore, Task, TaskManager, TaskStore};
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod state;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TASKBOOK_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "taskbook", version, long_version = LONG_VERSION, about = "Personal task tracker backed by a JSON file")]
struct Cli {
    /// Task file to use instead of the configured one
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a task; rejects empty fields, bad dates, unknown priorities and duplicates
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: String,

        /// Low, Medium or High
        #[arg(long)]
        priority: String,
    },

    /// List stored tasks
    List {
        /// Only open tasks due before today (in the configured timezone)
        #[arg(long, default_value_t = false)]
        overdue: bool,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Export every task to a CSV file
    Export {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Run the four sample additions and print each outcome
    Demo {
        /// Write to the real store instead of an in-memory one
        #[arg(long, default_value_t = false)]
        persist: bool,
    },

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.taskbook/config.toml with defaults if it doesn't exist
    Init,

    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A broken config only matters to commands that read it.
    let cfg = config::load_config();
    let level = cfg.as_ref().map(|c| c.log.level.as_str()).unwrap_or("warn");
    init_logging(level, cli.verbose);
    if let Err(e) = &cfg {
        tracing::warn!("Config not loaded: {:#}", e);
    }

    match cli.command {
        Command::Add {
            title,
            description,
            due,
            priority,
        } => {
            let mgr = open_manager(&cfg, cli.store)?;
            run_add(&mgr, &title, &description, &due, &priority, &mut io::stdout().lock())?;
        }

        Command::List { overdue, json } => {
            let mgr = open_manager(&cfg, cli.store)?;
            let tasks = if overdue {
                mgr.overdue_tasks(require(&cfg)?.today()?)
            } else {
                mgr.list_tasks()
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print_table(&tasks);
            }
        }

        Command::Export { csv } => {
            let mgr = open_manager(&cfg, cli.store)?;
            let tasks = mgr.list_tasks();
            export::write_csv(&tasks, &csv)
                .with_context(|| format!("exporting to {}", csv.display()))?;
            println!("Exported {} tasks to {}", tasks.len(), csv.display());
        }

        Command::Demo { persist } => {
            let mut out = io::stdout().lock();
            if persist {
                run_demo(&open_manager(&cfg, cli.store)?, &mut out)?;
            } else {
                run_demo(&TaskManager::new(MemoryStore::new()), &mut out)?;
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = require(&cfg)?;
                println!("# {}", config::config_path()?.display());
                println!("# store in use: {}", cfg.store_path(cli.store.clone())?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logging(level: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = if verbose { "debug" } else { level };
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn require(cfg: &Result<config::Config>) -> Result<&config::Config> {
    cfg.as_ref().map_err(|e| anyhow::anyhow!("{:#}", e))
}

/// `--store` needs no config at all; otherwise the configured path is used.
fn resolve_store(cfg: &Result<config::Config>, store: Option<PathBuf>) -> Result<PathBuf> {
    match store {
        Some(p) => Ok(p),
        None => require(cfg)?.store_path(None),
    }
}

fn open_manager(
    cfg: &Result<config::Config>,
    store: Option<PathBuf>,
) -> Result<TaskManager<JsonFileStore>> {
    let path = resolve_store(cfg, store)?;
    tracing::debug!("Using task store {}", path.display());
    Ok(TaskManager::new(JsonFileStore::new(path)))
}

fn run_add<S: TaskStore, W: Write>(
    mgr: &TaskManager<S>,
    title: &str,
    description: &str,
    due: &str,
    priority: &str,
    out: &mut W,
) -> Result<()> {
    let task = mgr.add_task(title, description, due, priority)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&task)?)?;
    Ok(())
}

fn run_demo<S: TaskStore, W: Write>(mgr: &TaskManager<S>, out: &mut W) -> io::Result<()> {
    let steps = [
        ("Add a valid task", ("Mua sách", "Sách Công nghệ phần mềm.", "2025-07-20", "Cao")),
        ("Add the same task again", ("Mua sách", "Sách Công nghệ phần mềm.", "2025-07-20", "Cao")),
        ("Add another task", ("Tập thể dục", "Tập gym 1 tiếng.", "2025-07-21", "Trung bình")),
        ("Add a task with an empty title", ("", "Nhiệm vụ không có tiêu đề.", "2025-07-22", "Thấp")),
    ];

    for (label, (title, description, due, priority)) in steps {
        writeln!(out, "\n{}:", label)?;
        match mgr.add_task(title, description, due, priority) {
            Ok(task) => writeln!(out, "Added task with ID: {}", task.id)?,
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
    }
    Ok(())
}

fn print_table(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    for t in tasks {
        println!(
            "#{:<4} {} | {:<6} | {:<13} | {}",
            t.id, t.due_date, t.priority, t.status, t.title
        );
        if !t.description.is_empty() {
            println!("      {}", t.description);
        }
    }
}
