//! cb - a simple command-line contacts book that stores data locally
//!
//! A thin CLI over `contacts-book-core`: every command opens the lock-guarded
//! data file, loads the book, runs one operation and releases the lock.

use clap::Parser;

mod commands;
mod util;

use commands::Cli;

fn main() {
    let cli = Cli::parse();
    contacts_book_core::logging::init();

    let cancel = util::signal::install_shutdown_handler();

    if let Err(e) = cli.execute(&cancel) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
