/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Landing page
 * 2. Document API routes
 * 3. Cable (realtime) route
 * 4. Static files
 * 5. Fallback handler (404)
 */

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::documents::index;
use crate::backend::realtime::handle_cable_subscription;
use crate::backend::routes::doc_routes::configure_doc_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Routes
///
/// - `GET /` - Editor shell
/// - `GET|POST|PUT /docs`, `GET|PUT /docs/{id}` - Document API
/// - `GET /cable` - Server-Sent Events stream of edits
/// - `/static/*` - Files under `public/`
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/", axum::routing::get(index));

    // Add document API routes
    let router = configure_doc_routes(router);

    // Realtime edits
    let router = router.route("/cable", axum::routing::get(handle_cable_subscription));

    // Add static file serving
    let router = router.nest_service("/static", ServeDir::new("public"));

    // Fallback handler for 404
    let router = router.fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") });

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
