//! Add command implementation

use anyhow::Result;
use clap::Args;

use super::session::Session;
use crate::util::input::draft_from_flags;

/// Add a new contact
#[derive(Args, Debug)]
pub struct AddArgs {
    /// First name
    #[arg(long, default_value = "")]
    first_name: String,

    /// Last name
    #[arg(long, default_value = "")]
    last_name: String,

    /// Phone number; use a comma-separated list or repeat the flag for several values
    #[arg(long = "phone")]
    phones: Vec<String>,
}

/// Execute the add command
pub fn execute(args: AddArgs, session: &Session) -> Result<()> {
    let draft = draft_from_flags(&args.first_name, &args.last_name, &args.phones);

    let contact = session.with_book(|book| Ok(book.add_contact(draft)?))?;

    println!("succeed, id {}", contact.id);
    Ok(())
}
