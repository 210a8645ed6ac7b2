/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection, broadcast channel creation, and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Create the `documents` broadcast channel
 * 2. Load the document store (PostgreSQL if configured, memory otherwise)
 * 3. Create the router
 */

use axum::Router;

use crate::backend::realtime::DocumentsChannel;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_store, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: documents are kept in memory
/// - Migration failures: logged but don't prevent startup
pub async fn create_app(config: &ServerConfig) -> Router<()> {
    tracing::info!("Initializing xfdocs backend server");

    let channel = DocumentsChannel::new(config.broadcast_capacity);
    tracing::info!(
        "Broadcast channel '{}' initialized (capacity {})",
        channel.topic(),
        config.broadcast_capacity
    );

    let store = load_store(config).await;
    tracing::info!("Using {} document store", store.backend_name());

    let app = create_router(AppState::new(store, channel));
    tracing::info!("Router configured");

    app
}
