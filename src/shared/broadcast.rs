/**
 * Realtime Broadcast Envelope
 *
 * Every successful edit emits exactly one `BroadcastMessage` on the
 * `documents` topic. Messages are ephemeral: they are never persisted and
 * subscribers that connect later never see them.
 *
 * # Wire Format
 *
 * ```json
 * {"id": 1, "document": "new body text"}
 * ```
 *
 * `document` carries the new body. `id` names the document it belongs to, so
 * a client with one document open can ignore edits to the others.
 */
use serde::{Deserialize, Serialize};

use crate::shared::document::{Document, DocumentId};

/// Name of the single shared topic
pub const DOCUMENTS_TOPIC: &str = "documents";

/// Message pushed to subscribers after an edit is persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BroadcastMessage {
    /// Document that changed
    pub id: DocumentId,
    /// New body text
    pub document: String,
}

impl BroadcastMessage {
    pub fn new(id: DocumentId, document: impl Into<String>) -> Self {
        Self {
            id,
            document: document.into(),
        }
    }

    /// Build the message announcing `doc`'s current body
    pub fn for_document(doc: &Document) -> Self {
        Self::new(doc.id, doc.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let msg = BroadcastMessage::new(1, "hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "document": "hello"}));
    }

    #[test]
    fn test_for_document_copies_body() {
        let mut doc = Document::new(4, "Notes".to_string());
        doc.replace_body("draft".to_string());
        let msg = BroadcastMessage::for_document(&doc);
        assert_eq!(msg.id, 4);
        assert_eq!(msg.document, "draft");
    }
}
