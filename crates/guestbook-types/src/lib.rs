//! Foundation types for the guestbook drawing log.
//!
//! Every other guestbook crate depends on `guestbook-types`.
//!
//! # Key Types
//!
//! - [`Drawing`] — One submitted drawing, an opaque byte payload
//! - [`DrawingId`] — Time-ordered identifier assigned at submission
//! - [`DrawingMetadata`] — Moderation record kept alongside each drawing
//! - [`Submitter`] — Who sent a request, as far as the edge could tell
//! - [`ObjectKey`] — The fixed object names the log is persisted under

pub mod drawing;
pub mod id;
pub mod keys;
pub mod metadata;

pub use drawing::{Drawing, DELIMITER};
pub use id::DrawingId;
pub use keys::ObjectKey;
pub use metadata::{DrawingMetadata, Submitter};
