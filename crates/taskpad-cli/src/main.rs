use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use taskpad_core::config;
use taskpad_core::store::TaskStore;

mod commands;
mod select;

#[derive(Parser)]
#[command(
    name = "taskpad",
    version = taskpad_core::version(),
    about = "Personal task list in your terminal"
)]
struct Cli {
    /// Task file to operate on (defaults to ./tasks.json)
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new task
    Add {
        /// Title of the task
        title: String,
    },
    /// Show all tasks
    List,
    /// Mark tasks as done
    Done,
    /// Delete tasks
    Delete,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let store = TaskStore::new(config::resolve_store_path(cli.file.as_deref(), &cwd));
    match cli.command {
        Command::Add { title } => commands::cmd_add(&store, &title),
        Command::List => commands::cmd_list(&store),
        Command::Done => commands::cmd_done(&store),
        Command::Delete => commands::cmd_delete(&store),
    }
}
