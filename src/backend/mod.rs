//! Backend Module
//!
//! This module contains all server-side code for xfdocs: an Axum HTTP server
//! exposing the document API and the realtime `documents` topic.
//!
//! # Overview
//!
//! - Axum HTTP server setup and configuration
//! - Document API handlers (list, create, show, edit)
//! - Document store backends (memory, PostgreSQL)
//! - Realtime edit broadcasting over Server-Sent Events
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization, state, configuration
//! ├── routes/         - Route configuration
//! ├── documents/      - Document API handlers
//! ├── store/          - Document persistence
//! ├── realtime/       - Broadcast channel and /cable stream
//! └── error/          - Error types
//! ```
//!
//! # Control Flow
//!
//! A `PUT /docs` request is handled by `documents::edit_document`, which
//! writes through the `DocumentStore` and, only after that succeeds,
//! publishes one `BroadcastMessage` on the `DocumentsChannel`. Every open
//! `/cable` stream then forwards it to its client.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Document API handlers
pub mod documents;

/// Document persistence
pub mod store;

/// Real-time update system
pub mod realtime;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use server::{create_app, AppState, ServerConfig};
pub use realtime::{handle_cable_subscription, DocumentsChannel, Subscription};
pub use store::{DocumentStore, MemoryStore, PgStore, StoreError};
pub use error::BackendError;
