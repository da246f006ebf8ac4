//! Terminal front end for the task list.
//!
//! # Responsibility
//! - Stand in for the UI collaborator during local checks.
//! - Open one store per invocation, load it once, apply one operation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use todolist_core::{
    default_db_path, default_log_level, init_logging, text_meets_minimum, KeyValueStorage,
    SqliteStorage, TaskStore, DB_PATH_ENV,
};

const SHORT_TEXT_MESSAGE: &str = "ignored: task text must have at least 4 characters";

#[derive(Parser)]
#[command(name = "todolist")]
#[command(about = "Manage a local task list")]
#[command(version)]
struct Cli {
    /// SQLite file holding the task list
    #[arg(long, env = DB_PATH_ENV)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files (logging is off without it)
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a task (at least 4 characters after trimming)
    Add { text: String },
    /// List tasks in order
    List {
        /// Hide completed tasks
        #[arg(long)]
        hide_completed: bool,
    },
    /// Flip a task between open and done
    Toggle { id: String },
    /// Delete a task
    Delete { id: String },
    /// Replace a task's text; the task moves to the end with a new id
    Edit { id: String, text: String },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List { .. } => "list",
            Self::Toggle { .. } => "toggle",
            Self::Delete { .. } => "delete",
            Self::Edit { .. } => "edit",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let db_path = resolve_db_path(cli.db);
    let storage = SqliteStorage::open(&db_path)
        .with_context(|| format!("failed to open task store at {}", db_path.display()))?;
    let mut store = TaskStore::open(storage)?;

    for line in run(&mut store, cli.command)? {
        println!("{line}");
    }

    Ok(())
}

fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(default_db_path)
}

/// Applies one command and returns the lines to print.
fn run<S: KeyValueStorage>(store: &mut TaskStore<S>, command: Command) -> Result<Vec<String>> {
    let name = command.name();
    let mut lines = Vec::new();

    match command {
        Command::Add { text } => match store.add(&text)? {
            Some(id) => lines.push(format!("added {id}")),
            None => lines.push(SHORT_TEXT_MESSAGE.to_string()),
        },
        Command::List { hide_completed } => {
            for task in store.visible(!hide_completed) {
                let mark = if task.completed { 'x' } else { ' ' };
                lines.push(format!("[{mark}] {}  {}", task.id, task.text));
            }
            if lines.is_empty() {
                lines.push("No tasks to display".to_string());
            }
        }
        Command::Toggle { id } => match store.toggle_completed(&id)? {
            Some(true) => lines.push(format!("completed {id}")),
            Some(false) => lines.push(format!("reopened {id}")),
            None => lines.push(format!("no task {id}")),
        },
        Command::Delete { id } => {
            if store.delete(&id)? {
                lines.push(format!("deleted {id}"));
            } else {
                lines.push(format!("no task {id}"));
            }
        }
        Command::Edit { id, text } => {
            // Check first so a rejected replacement does not drop the task.
            if !text_meets_minimum(&text) {
                lines.push(SHORT_TEXT_MESSAGE.to_string());
            } else if store.begin_edit(&id)?.is_none() {
                lines.push(format!("no task {id}"));
            } else if let Some(new_id) = store.add(&text)? {
                lines.push(format!("edited {id} -> {new_id}"));
            }
        }
    }

    info!(
        "event=cli_command module=cli status=ok command={name} tasks={}",
        store.len()
    );
    Ok(lines)
}
