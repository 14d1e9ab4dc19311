//! Edit command implementation

use anyhow::Result;
use clap::Args;

use super::session::Session;
use crate::util::input::draft_from_flags;

/// Replace the names and phone numbers of a contact
///
/// All fields are overwritten: omitted phones clear the contact's numbers.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Id of the contact to edit
    #[arg(long)]
    id: u64,

    /// New first name
    #[arg(long, default_value = "")]
    first_name: String,

    /// New last name
    #[arg(long, default_value = "")]
    last_name: String,

    /// Phone number; use a comma-separated list or repeat the flag for several values
    #[arg(long = "phone")]
    phones: Vec<String>,
}

/// Execute the edit command
pub fn execute(args: EditArgs, session: &Session) -> Result<()> {
    let draft = draft_from_flags(&args.first_name, &args.last_name, &args.phones);

    session.with_book(|book| {
        book.update_contact(args.id, draft)?;
        Ok(())
    })?;

    println!("succeed");
    Ok(())
}
