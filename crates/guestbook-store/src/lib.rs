//! Key-addressed blob storage for the guestbook.
//!
//! The guestbook keeps all of its state in a handful of whole objects
//! (the drawing log, its metadata, and the blocked-IP set). This crate
//! provides the port those objects are read from and written to.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`InMemoryBlobStore`] -- `HashMap`-based store for tests and ephemeral runs
//! - [`FsBlobStore`] -- one file per key under a root directory
//!
//! # Design Rules
//!
//! 1. Objects are read and written whole. There is no append or range write.
//! 2. A missing key is `Ok(None)`, never an error.
//! 3. There is no versioning or conditional put: concurrent read-modify-write
//!    cycles against one key race, and the last writer wins.
//! 4. The store never interprets object contents.
//! 5. All I/O errors are propagated; callers decide what is fatal.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsBlobStore;
pub use memory::InMemoryBlobStore;
pub use traits::{validate_key, BlobStore};
