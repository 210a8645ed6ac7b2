/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct holds:
 * - The document store, behind the `DocumentStore` trait
 * - The `documents` broadcast channel
 * - The lock that orders edits against their broadcasts
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * ```rust,no_run
 * use xfdocs::backend::realtime::DocumentsChannel;
 * use axum::extract::State;
 *
 * async fn handler(State(channel): State<DocumentsChannel>) {
 *     let _ = channel.subscriber_count();
 * }
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::backend::realtime::DocumentsChannel;
use crate::backend::store::{DocumentStore, MemoryStore};

/// Shared handle to whichever store backend is active
pub type SharedStore = Arc<dyn DocumentStore>;

/// Application state shared by every handler
///
/// # Thread Safety
///
/// - `Arc<dyn DocumentStore>` backends synchronize internally
/// - `DocumentsChannel` wraps a `broadcast::Sender`, which is `Clone + Send + Sync`
#[derive(Clone)]
pub struct AppState {
    /// Document persistence
    pub store: SharedStore,

    /// Topic that every successful edit is published to
    pub channel: DocumentsChannel,

    /// Held across store update and publish so broadcasts follow write order
    pub edit_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: SharedStore, channel: DocumentsChannel) -> Self {
        Self {
            store,
            channel,
            edit_lock: Arc::new(Mutex::new(())),
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(broadcast_capacity: usize) -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            DocumentsChannel::new(broadcast_capacity),
        )
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for DocumentsChannel {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.channel.clone()
    }
}
