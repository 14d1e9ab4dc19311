//! Dual contact index: by id and by uniqueness key
//!
//! Every mutating method updates both maps together. The `Book` applies
//! mutations to a clone and commits it only after the snapshot is persisted.

use super::contact::{Contact, ContactDraft, ContactKey};
use super::error::BookError;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub(crate) struct Index {
    by_id: BTreeMap<u64, Contact>,
    by_key: HashMap<ContactKey, u64>,
    top_id: u64,
}

impl Index {
    /// Rebuild both maps and `top_id` from a decoded snapshot
    pub(crate) fn from_contacts(contacts: Vec<Contact>) -> Result<Self, BookError> {
        let mut index = Self::default();

        for contact in contacts {
            let key = contact.key();
            if index.by_id.contains_key(&contact.id) {
                return Err(BookError::Corrupt {
                    reason: format!("duplicate id {}", contact.id),
                });
            }
            if index.by_key.contains_key(&key) {
                return Err(BookError::Corrupt {
                    reason: format!(
                        "duplicate name {} {}",
                        contact.first_name, contact.last_name
                    ),
                });
            }

            index.top_id = index.top_id.max(contact.id);
            index.by_key.insert(key, contact.id);
            index.by_id.insert(contact.id, contact);
        }

        Ok(index)
    }

    /// Assign the next id to `draft` and index it
    pub(crate) fn insert(&mut self, draft: ContactDraft) -> Result<Contact, BookError> {
        let key = draft.key();
        if self.by_key.contains_key(&key) {
            return Err(exists(&draft));
        }

        self.top_id = self.top_id.checked_add(1).ok_or(BookError::IdsExhausted)?;
        let contact = draft.into_contact(self.top_id);
        self.by_key.insert(key, contact.id);
        self.by_id.insert(contact.id, contact.clone());
        Ok(contact)
    }

    /// Overwrite the fields of contact `id`, relocating its key
    pub(crate) fn update(&mut self, id: u64, draft: ContactDraft) -> Result<Contact, BookError> {
        let old_key = match self.by_id.get(&id) {
            Some(existing) => existing.key(),
            None => return Err(BookError::ContactMissing { id }),
        };

        let new_key = draft.key();
        if let Some(&owner) = self.by_key.get(&new_key)
            && owner != id
        {
            return Err(exists(&draft));
        }

        let contact = draft.into_contact(id);
        self.by_key.remove(&old_key);
        self.by_key.insert(new_key, id);
        self.by_id.insert(id, contact.clone());
        Ok(contact)
    }

    /// Drop contact `id` from both maps
    pub(crate) fn remove(&mut self, id: u64) -> Result<Contact, BookError> {
        let contact = self
            .by_id
            .remove(&id)
            .ok_or(BookError::ContactMissing { id })?;
        self.by_key.remove(&contact.key());
        Ok(contact)
    }

    pub(crate) fn get(&self, id: u64) -> Option<&Contact> {
        self.by_id.get(&id)
    }

    /// Live contacts ascending by id
    pub(crate) fn ordered(&self) -> Vec<Contact> {
        self.by_id.values().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn top_id(&self) -> u64 {
        self.top_id
    }

    /// Full snapshot as pretty JSON, ordered by id
    pub(crate) fn to_snapshot(&self) -> Result<Vec<u8>, BookError> {
        let contacts: Vec<&Contact> = self.by_id.values().collect();
        serde_json::to_vec_pretty(&contacts).map_err(|source| BookError::Snapshot { source })
    }

    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        self.by_id.len() == self.by_key.len()
            && self
                .by_id
                .values()
                .all(|c| self.by_key.get(&c.key()) == Some(&c.id))
            && self.by_id.keys().all(|&id| id <= self.top_id)
    }
}

fn exists(draft: &ContactDraft) -> BookError {
    BookError::ContactExists {
        first_name: draft.first_name.clone(),
        last_name: draft.last_name.clone(),
    }
}
