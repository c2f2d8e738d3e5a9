//! HTTP server for the guestbook drawing log.
//!
//! One resource, three verbs:
//!
//! - `GET /api/drawings` -- the raw log blob (`application/octet-stream`)
//! - `POST /api/drawings` -- body is one new drawing
//! - `DELETE /api/drawings` -- `secret-key`, `drawing-index` and optional
//!   `block-ip: true` headers
//!
//! plus `GET /health`.

pub mod client_ip;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod webhook;

pub use config::{ServerConfig, StorageConfig};
pub use error::{ApiError, ServerError, ServerResult};
pub use handler::AppState;
pub use server::{open_guestbook, open_store, GuestbookServer};
pub use webhook::WebhookNotifier;
