//! Lock-guarded file storage for the contacts snapshot
//!
//! Key features:
//!
//! - **Exclusive lock file**: advisory lock (fs2) taken once at open with a
//!   bounded backoff wait; a second process fails fast with `Locked`
//! - **Atomic replace**: each write goes to an owner-only temp file that is
//!   fsynced and renamed over the data file
//! - **Fresh install**: a missing data file reads as empty
//!
//! # Example
//!
//! ```rust,no_run
//! use contacts_book_core::io::{FileStore, Store};
//! use contacts_book_core::CancellationToken;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! let store = FileStore::open(
//!     "/home/user/.contacts-book.json",
//!     Path::new("/tmp/contacts-book.lock"),
//!     Duration::from_secs(1),
//!     &CancellationToken::new(),
//! )
//! .unwrap();
//!
//! let snapshot = store.read().unwrap();
//! store.write(&snapshot).unwrap();
//! store.close().unwrap();
//! ```

pub mod atomic;
pub mod error;
pub mod lock;
pub mod store;

// Re-export primary API
pub use error::StoreError;
pub use store::{FileStore, MemoryStore, Store};
