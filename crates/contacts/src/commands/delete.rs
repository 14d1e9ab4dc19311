//! Delete command implementation

use anyhow::Result;
use clap::Args;

use super::session::Session;

/// Delete a contact
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the contact to delete
    #[arg(long)]
    id: u64,
}

/// Execute the delete command
pub fn execute(args: DeleteArgs, session: &Session) -> Result<()> {
    session.with_book(|book| {
        book.delete_contact(args.id)?;
        Ok(())
    })?;

    println!("succeed");
    Ok(())
}
