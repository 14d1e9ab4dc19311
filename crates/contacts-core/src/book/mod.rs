//! The contact book: an in-memory index mirrored to a [`Store`]
//!
//! The book loads the full snapshot once at [`Book::open`] and writes the full
//! snapshot back after every successful mutation. Mutations are staged on a
//! copy of the index; the copy replaces the live index only once the store
//! accepted the new snapshot, so a failed write leaves the book unchanged.
//!
//! Add, update and delete take the index write lock; listing takes the read
//! lock.

mod contact;
mod error;
mod index;

pub use contact::{Contact, ContactDraft};
pub use error::BookError;

use crate::io::Store;
use index::Index;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Contact repository bound to a store
pub struct Book<S: Store> {
    store: S,
    index: RwLock<Index>,
}

impl<S: Store> Book<S> {
    /// Load the book from `store`
    ///
    /// Empty or whitespace-only contents give an empty book.
    ///
    /// # Errors
    ///
    /// - `BookError::Store` if the store cannot be read
    /// - `BookError::Snapshot` if the contents are not a JSON array of contacts
    /// - `BookError::Corrupt` if the snapshot repeats an id or a name pair
    pub fn open(store: S) -> Result<Self, BookError> {
        let bytes = store.read()?;

        let payload = strip_bom(&bytes);

        let index = if is_blank(payload) {
            debug!("empty snapshot, starting with no contacts");
            Index::default()
        } else {
            let contacts: Vec<Contact> = serde_json::from_slice(payload)
                .map_err(|source| BookError::Snapshot { source })?;
            debug!("loaded {} contacts", contacts.len());
            Index::from_contacts(contacts)?
        };

        Ok(Self {
            store,
            index: RwLock::new(index),
        })
    }

    /// Add a new contact and return it with its assigned id
    ///
    /// # Errors
    ///
    /// - `BookError::ContactInvalid` if both names are blank
    /// - `BookError::ContactExists` if the name pair is already taken
    /// - `BookError::IdsExhausted` if `u64::MAX` was already assigned
    /// - `BookError::Store` if the snapshot could not be persisted
    pub fn add_contact(&self, draft: ContactDraft) -> Result<Contact, BookError> {
        let draft = validated(draft)?;
        self.mutate(|index| index.insert(draft))
    }

    /// Replace the names and numbers of contact `id`
    ///
    /// The id is preserved and the name index follows the new names.
    ///
    /// # Errors
    ///
    /// - `BookError::ContactMissing` if no live contact has `id`
    /// - `BookError::ContactInvalid` if both new names are blank
    /// - `BookError::ContactExists` if another contact owns the new name pair
    /// - `BookError::Store` if the snapshot could not be persisted
    pub fn update_contact(&self, id: u64, draft: ContactDraft) -> Result<Contact, BookError> {
        self.mutate(|index| {
            if index.get(id).is_none() {
                return Err(BookError::ContactMissing { id });
            }
            index.update(id, validated(draft)?)
        })
    }

    /// Delete contact `id` and return what was removed
    ///
    /// # Errors
    ///
    /// - `BookError::ContactMissing` if no live contact has `id`
    /// - `BookError::Store` if the snapshot could not be persisted
    pub fn delete_contact(&self, id: u64) -> Result<Contact, BookError> {
        self.mutate(|index| index.remove(id))
    }

    /// Hand all live contacts, ascending by id, to `f`
    ///
    /// `f` runs under the read lock; its error is returned as-is.
    pub fn list_contacts<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&[Contact]) -> Result<T, E>,
        E: From<BookError>,
    {
        let index = self.read()?;
        let contacts = index.ordered();
        f(&contacts)
    }

    /// Look up a single contact by id
    pub fn get(&self, id: u64) -> Result<Option<Contact>, BookError> {
        Ok(self.read()?.get(id).cloned())
    }

    pub fn len(&self) -> Result<usize, BookError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, BookError> {
        Ok(self.len()? == 0)
    }

    /// Highest id ever assigned, including deleted contacts
    pub fn top_id(&self) -> Result<u64, BookError> {
        Ok(self.read()?.top_id())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, e.g. to close it
    pub fn into_store(self) -> S {
        self.store
    }

    /// Release the underlying store
    pub fn close(self) -> Result<(), BookError> {
        self.store.close().map_err(BookError::from)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Index>, BookError> {
        self.index.read().map_err(|_| BookError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Index>, BookError> {
        self.index.write().map_err(|_| BookError::Poisoned)
    }

    /// Apply `op` to a staged copy, persist it, then commit
    fn mutate<T, F>(&self, op: F) -> Result<T, BookError>
    where
        F: FnOnce(&mut Index) -> Result<T, BookError>,
    {
        let mut live = self.write()?;
        let mut staged = live.clone();
        let out = op(&mut staged)?;

        let snapshot = staged.to_snapshot()?;
        self.store.write(&snapshot)?;
        debug!("persisted {} contacts ({} bytes)", staged.len(), snapshot.len());

        *live = staged;
        Ok(out)
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Blank in the Unicode sense, so NBSP-only files count as empty too
fn is_blank(bytes: &[u8]) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.trim().is_empty(),
        Err(_) => bytes.trim_ascii().is_empty(),
    }
}

fn validated(draft: ContactDraft) -> Result<ContactDraft, BookError> {
    let draft = draft.normalized();
    if draft.is_valid() {
        Ok(draft)
    } else {
        Err(BookError::ContactInvalid)
    }
}
