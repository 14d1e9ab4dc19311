//! Core types and storage for contacts-book (cb)
//!
//! This crate provides the persistence-and-indexing core of a personal
//! contacts manager:
//!
//! - [`io`]: a lock-guarded byte store backed by a single data file
//! - [`book`]: the in-memory contact index mirrored to that store as a JSON
//!   snapshot after every mutation
//! - [`config`]: storage path resolution from flags, environment and
//!   `~/.config/contacts-book/config.toml`
//!
//! Only one process may hold the store open at a time; a second opener fails
//! fast with [`io::StoreError::Locked`].

pub mod book;
pub mod config;
pub mod home;
pub mod io;
pub mod logging;

pub use book::{Book, BookError, Contact, ContactDraft};
pub use io::{FileStore, MemoryStore, Store, StoreError};

// Re-export so callers share the same token type
pub use tokio_util::sync::CancellationToken;
