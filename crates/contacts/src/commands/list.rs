//! List command implementation

use anyhow::Result;
use clap::Args;
use contacts_book_core::Contact;
use std::io::Write;

use super::session::Session;

/// List all contacts
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Execute the list command
pub fn execute(args: ListArgs, session: &Session) -> Result<()> {
    session.with_book(|book| {
        book.list_contacts(|contacts| -> Result<()> {
            let mut out = std::io::stdout().lock();
            if args.json {
                serde_json::to_writer_pretty(&mut out, contacts)?;
                writeln!(out)?;
            } else {
                render_text(&mut out, contacts)?;
            }
            Ok(())
        })
    })
}

/// Plain text listing: a header, then each contact with its numbers
fn render_text(out: &mut impl Write, contacts: &[Contact]) -> std::io::Result<()> {
    writeln!(out, "# contacts")?;
    if contacts.is_empty() {
        writeln!(out, "(empty)")?;
    }

    for contact in contacts {
        writeln!(
            out,
            "[{}] {} {}",
            contact.id, contact.first_name, contact.last_name
        )?;
        for phone in &contact.telephone_numbers {
            writeln!(out, " - {phone}")?;
        }
    }

    Ok(())
}
