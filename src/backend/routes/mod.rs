//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports and documentation
//! ├── router.rs      - Main router creation
//! └── doc_routes.rs  - Document API routes
//! ```
//!
//! # Route Types
//!
//! ## Document Routes
//!
//! - `GET /docs` - List documents
//! - `POST /docs` - Create a document
//! - `PUT /docs` - Edit a document
//! - `GET /docs/{id}` - Fetch a document
//! - `PUT /docs/{id}` - Edit a document and return it
//!
//! ## Realtime
//!
//! - `GET /cable` - Server-Sent Events stream on the `documents` topic

/// Main router creation
pub mod router;

/// Document API routes
pub mod doc_routes;

// Re-export commonly used functions
pub use router::create_router;
