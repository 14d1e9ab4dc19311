//! CLI command dispatch and execution

use anyhow::Result;
use clap::{Parser, Subcommand};
use contacts_book_core::CancellationToken;
use std::path::PathBuf;

mod add;
mod delete;
mod edit;
mod error;
mod list;
mod session;

use session::Session;

/// cb - a simple contacts book that stores data locally
#[derive(Parser, Debug)]
#[command(
    name = "cb",
    version,
    about = "A simple cli contacts book that stores data locally",
    long_about = "Manage personal contacts in a single local JSON file guarded by a lock file.\n\
                  Run `cb <command> --help` to see the flags of each command."
)]
pub struct Cli {
    /// Data file holding the contacts (default: ~/.contacts-book.json)
    #[arg(long, global = true, value_name = "PATH")]
    data_file: Option<PathBuf>,

    /// Lock file guarding the data file (default: <tmp>/contacts-book.lock)
    #[arg(long, global = true, value_name = "PATH")]
    lock_file: Option<PathBuf>,

    /// Config file (default: ~/.config/contacts-book/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all contacts ordered by id
    List(list::ListArgs),

    /// Add a new contact
    Add(add::AddArgs),

    /// Replace the names and phone numbers of a contact
    Edit(edit::EditArgs),

    /// Delete a contact
    Delete(delete::DeleteArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self, cancel: &CancellationToken) -> Result<()> {
        let session = Session::resolve(
            self.data_file,
            self.lock_file,
            self.config,
            cancel.clone(),
        )?;

        match self.command {
            Commands::List(args) => list::execute(args, &session),
            Commands::Add(args) => add::execute(args, &session),
            Commands::Edit(args) => edit::execute(args, &session),
            Commands::Delete(args) => delete::execute(args, &session),
        }
    }
}
