/**
 * Cable Subscription Handler
 *
 * This module implements the Server-Sent Events (SSE) handler for the
 * `/cable` endpoint. Each connection holds one subscription to the
 * `documents` topic and receives every edit published after it connected.
 *
 * # Filtering
 *
 * Clients may narrow the stream to a single document with the `doc` query
 * parameter:
 * - `?doc=3` - only edits to document 3
 * - No parameter - every edit
 *
 * # Connection Management
 *
 * - Connections are kept alive using the SSE keep-alive mechanism
 * - Lagged messages are logged but don't cause connection drops
 * - There is no replay; a reconnecting client only sees new edits
 */

use crate::backend::error::BackendError;
use crate::backend::realtime::broadcast::DocumentsChannel;
use crate::shared::{DocumentId, DOCUMENTS_TOPIC};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::{future, StreamExt};
use std::collections::HashMap;

/// Parse the optional `doc` filter
fn parse_doc_filter(query: &HashMap<String, String>) -> Result<Option<DocumentId>, BackendError> {
    match query.get("doc").map(|s| s.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<DocumentId>().map(Some).map_err(|_| {
            BackendError::handler(StatusCode::BAD_REQUEST, format!("invalid doc id: {}", raw))
        }),
    }
}

/// Handle cable subscription (GET /cable)
///
/// # Query Parameters
///
/// - `doc` - Only deliver edits to this document id (optional)
///
/// # Returns
///
/// Server-Sent Events stream; one `documents` event per edit
///
/// # Errors
///
/// * `400 Bad Request` - If `doc` is not an integer
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Content-Type: text/event-stream
///
/// event: documents
/// data: {"id":1,"document":"hello"}
/// ```
pub async fn handle_cable_subscription(
    State(channel): State<DocumentsChannel>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>>, BackendError> {
    let filter = parse_doc_filter(&query)?;

    let subscription = channel.subscribe();
    match filter {
        Some(doc_id) => tracing::info!(
            "[Cable] Subscription {} active for document {}",
            subscription.id(),
            doc_id
        ),
        None => tracing::info!(
            "[Cable] Subscription {} active for all documents",
            subscription.id()
        ),
    }

    // Axum's keep-alive injects ":" comment lines, so only real edits are yielded here
    let subscription_id = subscription.id();
    let stream = subscription
        .into_stream()
        .filter(move |message| future::ready(filter.map_or(true, |doc_id| message.id == doc_id)))
        .filter_map(move |message| async move {
            match serde_json::to_string(&message) {
                Ok(data) => {
                    tracing::debug!(
                        "[Cable] Delivering document {} to subscription {}",
                        message.id,
                        subscription_id
                    );
                    Some(Ok::<_, axum::Error>(
                        Event::default().event(DOCUMENTS_TOPIC).data(data),
                    ))
                }
                Err(e) => {
                    tracing::error!("[Cable] Failed to serialize message: {:?}", e);
                    None
                }
            }
        });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
