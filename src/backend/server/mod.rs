//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading (file, env, database)
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # State Management
//!
//! `AppState` holds the document store and the `documents` broadcast
//! channel. Both are cheap to clone and shared by every handler.
//!
//! # Example
//!
//! ```rust,no_run
//! use xfdocs::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() {
//! let config = ServerConfig::load();
//! let app = create_app(&config).await;
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::ServerConfig;
pub use init::create_app;
pub use state::{AppState, SharedStore};
