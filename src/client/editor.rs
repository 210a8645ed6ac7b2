//! Editor State
//!
//! Local state for one editing session: the document list, the draft for a
//! new document, and the document currently open. All mutation happens
//! through the methods here, one event at a time.
//!
//! The open document is not a copy. `edited` names an entry in
//! `documents`, so a remote edit applied to the open document is also
//! visible in the list.
//!
//! Remote edits are applied only when their id matches the open document.

use crate::client::api::{ClientError, DocumentApi};
use crate::shared::{BroadcastMessage, Document, DocumentId};

/// Draft for a document that has not been created yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDocument {
    pub title: String,
}

/// Client-side editor state driven through a [`DocumentApi`]
#[derive(Debug)]
pub struct Editor<A> {
    api: A,
    documents: Vec<Document>,
    new_document: NewDocument,
    edited: Option<DocumentId>,
    notice: Option<String>,
}

impl<A: DocumentApi> Editor<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            documents: Vec::new(),
            new_document: NewDocument::default(),
            edited: None,
            notice: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn new_document(&self) -> &NewDocument {
        &self.new_document
    }

    pub fn new_document_mut(&mut self) -> &mut NewDocument {
        &mut self.new_document
    }

    /// Last error shown to the user, cleared on read
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Load the document list
    ///
    /// Returns `false` and records a notice if the list could not be fetched.
    pub async fn init(&mut self) -> bool {
        match self.api.list().await {
            Ok(documents) => {
                tracing::debug!("[Editor] Loaded {} documents", documents.len());
                self.documents = documents;
                true
            }
            Err(e) => {
                self.fail("Error loading documents", &e);
                false
            }
        }
    }

    /// Create a document from the draft title
    ///
    /// On success the new document is appended to the list and the draft is
    /// cleared.
    pub async fn create(&mut self) -> Option<&Document> {
        let title = self.new_document.title.clone();
        match self.api.create(&title).await {
            Ok(document) => {
                tracing::debug!("[Editor] Created document {}", document.id);
                self.new_document = NewDocument::default();
                self.documents.push(document);
                self.documents.last()
            }
            Err(e) => {
                self.fail("Error creating document", &e);
                None
            }
        }
    }

    /// Open the listed document with this id for editing
    ///
    /// Returns `false` if no listed document has that id; the current
    /// selection is kept in that case.
    pub fn start_edit(&mut self, id: DocumentId) -> bool {
        if self.position(id).is_some() {
            self.edited = Some(id);
            true
        } else {
            false
        }
    }

    pub fn edited_id(&self) -> Option<DocumentId> {
        self.edited
    }

    pub fn edited_document(&self) -> Option<&Document> {
        let index = self.edited.and_then(|id| self.position(id))?;
        self.documents.get(index)
    }

    /// Change the local body of the open document
    pub fn set_body(&mut self, body: impl Into<String>) -> bool {
        match self.edited_document_mut() {
            Some(doc) => {
                doc.body = body.into();
                true
            }
            None => false,
        }
    }

    /// Send the open document's body to the server
    ///
    /// On success the local entry is replaced by the stored document.
    pub async fn edit(&mut self) -> bool {
        let Some((id, body)) = self.edited_document().map(|d| (d.id, d.body.clone())) else {
            return false;
        };

        match self.api.edit(id, &body).await {
            Ok(stored) => {
                if let Some(index) = self.position(stored.id) {
                    self.documents[index] = stored;
                }
                true
            }
            Err(e) => {
                self.fail("Error saving document", &e);
                false
            }
        }
    }

    /// Merge a broadcast edit
    ///
    /// Returns `true` when the open document changed and the view needs a
    /// refresh.
    pub fn apply_remote(&mut self, message: &BroadcastMessage) -> bool {
        if self.edited != Some(message.id) {
            tracing::debug!("[Editor] Ignoring edit to document {} (not open)", message.id);
            return false;
        }

        match self.edited_document_mut() {
            Some(doc) if doc.body != message.document => {
                doc.body = message.document.clone();
                true
            }
            _ => false,
        }
    }

    fn edited_document_mut(&mut self) -> Option<&mut Document> {
        let index = self.edited.and_then(|id| self.position(id))?;
        self.documents.get_mut(index)
    }

    fn position(&self, id: DocumentId) -> Option<usize> {
        self.documents.iter().position(|d| d.id == id)
    }

    fn fail(&mut self, notice: &str, error: &ClientError) {
        tracing::warn!("[Editor] {}: {}", notice, error);
        self.notice = Some(format!("{}: {}", notice, error));
    }
}
