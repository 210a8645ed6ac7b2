//! xfdocs - collaborative document editing
//!
//! A document store served over a JSON HTTP API, with every edit broadcast
//! on the `documents` channel of the realtime `/cable` stream so that open
//! editors pick it up without reloading.
//!
//! # Module Structure
//!
//! - **`shared`** - Types used by both server and client
//!   - `Document`, request bodies, the broadcast message
//!   - Validation and error types
//!   - Client configuration
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum router and handlers for `/docs`
//!   - Document stores (in-memory and Postgres)
//!   - The `documents` broadcast channel and `/cable` stream
//!
//! - **`client`** - Editor client
//!   - reqwest client for `/docs`
//!   - `/cable` subscription with reconnects
//!   - Editor state that merges remote edits into the open document
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Builds the backend and the `xfdocs-server` binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use xfdocs::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load();
//! let app = create_app(&config).await;
//! let listener = tokio::net::TcpListener::bind(config.addr()?).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Editor client
pub mod client;
