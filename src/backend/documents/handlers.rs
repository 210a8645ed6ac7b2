/**
 * Document API Handlers
 *
 * JSON handlers for the `/docs` resource.
 *
 * # Edit Ordering
 *
 * Both edit endpoints persist first and publish second. If the store
 * rejects the update nothing is broadcast, and each successful update is
 * broadcast exactly once.
 *
 * Persist and publish run under `AppState::edit_lock`, so concurrent edits
 * are broadcast in the order the store applied them and subscribers settle
 * on the stored body.
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Html,
    Json,
};

use crate::backend::error::BackendError;
use crate::backend::server::state::{AppState, SharedStore};
use crate::shared::{
    BroadcastMessage, CreateDocumentRequest, Document, DocumentId, EditBodyRequest,
    EditDocumentRequest,
};

const INDEX_HTML: &str = include_str!("../../../public/index.html");

/// Serve the editor shell (GET /)
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// List every document (GET /docs)
pub async fn list_documents(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<Document>>, BackendError> {
    let documents = store.list_all().await?;
    tracing::debug!("[Docs] Listing {} documents", documents.len());
    Ok(Json(documents))
}

/// Create a document (POST /docs)
///
/// # Request Body
///
/// ```json
/// {"title": "Notes"}
/// ```
///
/// # Errors
///
/// * `400 Bad Request` - Body is not valid JSON
/// * `422 Unprocessable Entity` - Title missing or blank
pub async fn create_document(
    State(store): State<SharedStore>,
    payload: Result<Json<CreateDocumentRequest>, JsonRejection>,
) -> Result<Json<Document>, BackendError> {
    let Json(request) = payload?;
    let title = request.validated_title()?;

    let document = store.create(title).await?;
    tracing::info!("[Docs] Created document {} ({:?})", document.id, document.title);
    Ok(Json(document))
}

/// Fetch one document (GET /docs/{id})
///
/// # Errors
///
/// * `404 Not Found` - Unknown id
pub async fn show_document(
    State(store): State<SharedStore>,
    Path(id): Path<DocumentId>,
) -> Result<Json<Document>, BackendError> {
    Ok(Json(store.find_by_id(id).await?))
}

/// Replace a document's body (PUT /docs)
///
/// Responds 200 with an empty body once the edit is stored and broadcast.
///
/// # Request Body
///
/// ```json
/// {"id": 1, "body": "hello"}
/// ```
///
/// # Errors
///
/// * `404 Not Found` - Unknown id; nothing is broadcast
/// * `422 Unprocessable Entity` - `id` or `body` missing
pub async fn edit_document(
    State(app_state): State<AppState>,
    payload: Result<Json<EditDocumentRequest>, JsonRejection>,
) -> Result<StatusCode, BackendError> {
    let Json(request) = payload?;
    let (id, body) = request.into_parts()?;

    apply_edit(&app_state, id, &body).await?;
    Ok(StatusCode::OK)
}

/// Replace a document's body and return it (PUT /docs/{id})
///
/// Same effect as `PUT /docs`, but the caller gets the stored document
/// back and can reconcile its local copy.
pub async fn update_document(
    State(app_state): State<AppState>,
    Path(id): Path<DocumentId>,
    payload: Result<Json<EditBodyRequest>, JsonRejection>,
) -> Result<Json<Document>, BackendError> {
    let Json(request) = payload?;
    let body = request.into_body()?;

    let document = apply_edit(&app_state, id, &body).await?;
    Ok(Json(document))
}

/// Persist the new body, then publish it
///
/// The edit lock is held across both steps, so broadcasts follow store
/// write order.
async fn apply_edit(
    app_state: &AppState,
    id: DocumentId,
    body: &str,
) -> Result<Document, BackendError> {
    let _guard = app_state.edit_lock.lock().await;
    let document = app_state.store.update_body(id, body).await?;

    let delivered = app_state
        .channel
        .publish(BroadcastMessage::for_document(&document));
    tracing::info!(
        "[Docs] Edited document {} ({} bytes), {} subscribers notified",
        id,
        body.len(),
        delivered
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::store::StoreError;

    #[test]
    fn test_index_requests_report_network_failures() {
        let fetches = INDEX_HTML.matches("await fetch(").count();
        assert_eq!(fetches, 3);
        assert_eq!(INDEX_HTML.matches("try {").count(), fetches);
        for notice in ["Error loading documents", "Error creating document", "Error saving document"] {
            assert!(INDEX_HTML.contains(&format!("catch (e) {{ notice('{}'); }}", notice)));
        }
    }

    #[tokio::test]
    async fn test_apply_edit_publishes_once() {
        let state = AppState::in_memory(16);
        let doc = state.store.create("Notes").await.unwrap();
        let mut sub = state.channel.subscribe();

        let updated = apply_edit(&state, doc.id, "hello").await.unwrap();
        assert_eq!(updated.body, "hello");

        assert_eq!(sub.recv().await, Some(BroadcastMessage::new(doc.id, "hello")));
        assert_eq!(sub.try_recv(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_edits_broadcast_in_write_order() {
        let state = AppState::in_memory(256);
        let doc = state.store.create("Notes").await.unwrap();
        let id = doc.id;
        let mut sub = state.channel.subscribe();

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let state = state.clone();
                tokio::spawn(async move { apply_edit(&state, id, &format!("v{}", i)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let mut last = None;
        while let Some(message) = sub.try_recv() {
            last = Some(message);
        }
        let stored = state.store.find_by_id(id).await.unwrap();
        assert_eq!(last, Some(BroadcastMessage::new(id, stored.body)));
    }

    #[tokio::test]
    async fn test_apply_edit_unknown_id_publishes_nothing() {
        let state = AppState::in_memory(16);
        let mut sub = state.channel.subscribe();

        let err = apply_edit(&state, 42, "hello").await.unwrap_err();
        assert!(matches!(err, BackendError::StoreError(StoreError::NotFound(42))));
        assert_eq!(sub.try_recv(), None);
    }
}
