//! Route definitions for the `/courses` resource.
//!
//! Course creation lives under `/semesters/{semester_id}/courses`; this
//! router covers id-addressed operations and nests category routes
//! under `/courses/{course_id}/categories`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{category, course};
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /{id}                          -> get_by_id (nested tree + aggregates)
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
///
/// GET    /{id}/categories               -> list_by_course
/// POST   /{id}/categories               -> create
/// ```
pub fn router() -> Router<AppState> {
    let category_routes = Router::new().route(
        "/",
        get(category::list_by_course).post(category::create),
    );

    Router::new()
        .route(
            "/{id}",
            get(course::get_by_id)
                .put(course::update)
                .delete(course::delete),
        )
        // Same segment name as `/{id}` above: the router requires one
        // consistent parameter name per position.
        .nest("/{id}/categories", category_routes)
}
