//! Real-time Update Module
//!
//! This module carries document edits from the API handlers to every
//! connected editor.
//!
//! # Architecture
//!
//! - **`broadcast`** - The `documents` topic and per-subscriber handles
//! - **`subscription`** - Server-Sent Events handler for `GET /cable`
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Topic and subscriptions
//! └── subscription.rs - SSE subscription handler
//! ```
//!
//! # Real-time System
//!
//! The cable uses Server-Sent Events to push edits server to client. Edits
//! travel the other way as ordinary HTTP requests.

/// Topic and subscriptions
pub mod broadcast;

/// Server-Sent Events subscription handler
pub mod subscription;

// Re-export commonly used types and functions
pub use broadcast::{DocumentsChannel, Subscription, DEFAULT_CAPACITY};
pub use subscription::handle_cable_subscription;
