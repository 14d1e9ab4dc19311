//! Error types for contact book operations

use crate::io::StoreError;
use thiserror::Error;

/// Errors returned by [`crate::Book`] operations
#[derive(Error, Debug)]
pub enum BookError {
    /// A live contact already uses this first/last name pair
    #[error("contact exists for {first_name} {last_name}")]
    ContactExists {
        first_name: String,
        last_name: String,
    },

    /// No live contact has this id
    #[error("contact missing for id {id}")]
    ContactMissing { id: u64 },

    /// Both first and last name are blank
    #[error("contact invalid, first and last name must not both be blank")]
    ContactInvalid,

    /// Snapshot could not be decoded or encoded
    #[error("contacts snapshot is not valid JSON: {source}")]
    Snapshot { source: serde_json::Error },

    /// Snapshot decoded but breaks an index invariant
    #[error("contacts snapshot is corrupt: {reason}")]
    Corrupt { reason: String },

    /// The highest possible id has already been assigned
    #[error("contact ids exhausted, no id left above {max}", max = u64::MAX)]
    IdsExhausted,

    /// A thread panicked while holding the index lock
    #[error("contact index lock poisoned")]
    Poisoned,

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
