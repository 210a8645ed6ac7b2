/**
 * Document Data Structure
 *
 * This module defines the Document struct, the editable unit of content,
 * along with the JSON request bodies accepted by the document API.
 *
 * The Document struct is shared between the editor client and the backend,
 * so the same type is serialized by handlers and deserialized by the client.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Server-assigned document identifier
pub type DocumentId = i64;

/// A single editable document
///
/// # Fields
/// * `id` - Unique, server-assigned, immutable after creation
/// * `title` - Set once at creation; the edit path never touches it
/// * `body` - Empty on creation, replaced wholesale by edits
/// * `created_at` / `updated_at` - Maintained by the store
///
/// # Example
/// ```rust
/// use xfdocs::shared::Document;
///
/// let doc = Document::new(1, "Notes".to_string());
/// assert_eq!(doc.title, "Notes");
/// assert!(doc.body.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a fresh document with an empty body and both timestamps set to now
    pub fn new(id: DocumentId, title: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            body: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the body and refresh `updated_at`
    pub fn replace_body(&mut self, body: String) {
        self.body = body;
        self.updated_at = Utc::now();
    }
}

/// Body of `POST /docs`
///
/// `title` is optional at the serde level so a missing field surfaces as a
/// validation error rather than a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDocumentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CreateDocumentRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()) }
    }

    /// Return the title if present and not blank
    pub fn validated_title(&self) -> Result<&str, SharedError> {
        validate_title(self.title.as_deref())
    }
}

/// Body of `PUT /docs`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditDocumentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl EditDocumentRequest {
    pub fn new(id: DocumentId, body: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            body: Some(body.into()),
        }
    }

    /// Split into id and body, rejecting requests missing either
    pub fn into_parts(self) -> Result<(DocumentId, String), SharedError> {
        let id = self
            .id
            .ok_or_else(|| SharedError::validation("id", "can't be blank"))?;
        let body = self
            .body
            .ok_or_else(|| SharedError::validation("body", "can't be blank"))?;
        Ok((id, body))
    }
}

/// Body of `PUT /docs/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditBodyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl EditBodyRequest {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: Some(body.into()) }
    }

    pub fn into_body(self) -> Result<String, SharedError> {
        self.body
            .ok_or_else(|| SharedError::validation("body", "can't be blank"))
    }
}

/// Titles must be present and contain something other than whitespace
pub fn validate_title(title: Option<&str>) -> Result<&str, SharedError> {
    match title {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(SharedError::validation("title", "can't be blank")),
    }
}
