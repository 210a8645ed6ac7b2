//! Documents Module
//!
//! HTTP handlers for the document API. Handlers translate requests into
//! [`DocumentStore`](crate::backend::store::DocumentStore) calls and publish
//! edits on the `documents` topic.
//!
//! # Endpoints
//!
//! - `GET /docs` - List all documents
//! - `POST /docs` - Create a document from `{title}`
//! - `PUT /docs` - Edit from `{id, body}`, empty 200 response
//! - `GET /docs/{id}` - Fetch one document
//! - `PUT /docs/{id}` - Edit from `{body}`, returns the updated document

/// Document request handlers
pub mod handlers;

pub use handlers::{
    create_document, edit_document, index, list_documents, show_document, update_document,
};
