//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the editor client and the backend. These types are used for serialization
//! over the JSON document API and the realtime broadcast stream.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. All types are designed for serialization
//! and transmission over HTTP.

/// Document data structure and request bodies
pub mod document;

/// Realtime broadcast envelope
pub mod broadcast;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use document::{CreateDocumentRequest, Document, DocumentId, EditBodyRequest, EditDocumentRequest};
pub use broadcast::{BroadcastMessage, DOCUMENTS_TOPIC};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
