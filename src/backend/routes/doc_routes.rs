/**
 * Document Route Handlers
 *
 * # Routes
 *
 * - `GET /docs` - List documents
 * - `POST /docs` - Create a document
 * - `PUT /docs` - Edit a document (id in body, empty response)
 * - `GET /docs/{id}` - Fetch one document
 * - `PUT /docs/{id}` - Edit a document (returns the updated document)
 */

use axum::Router;

use crate::backend::documents::{
    create_document, edit_document, list_documents, show_document, update_document,
};
use crate::backend::server::state::AppState;

/// Configure document routes
pub fn configure_doc_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/docs",
            axum::routing::get(list_documents)
                .post(create_document)
                .put(edit_document),
        )
        .route(
            "/docs/{id}",
            axum::routing::get(show_document).put(update_document),
        )
}
