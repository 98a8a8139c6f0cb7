//! Route definitions for the `/semesters` resource.
//!
//! Also nests semester-scoped course routes under
//! `/semesters/{semester_id}/courses`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{course, semester};
use crate::state::AppState;

/// Routes mounted at `/semesters`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
///
/// GET    /{id}/courses                  -> list_by_semester
/// POST   /{id}/courses                  -> create
/// ```
pub fn router() -> Router<AppState> {
    let course_routes = Router::new().route(
        "/",
        get(course::list_by_semester).post(course::create),
    );

    Router::new()
        .route("/", get(semester::list).post(semester::create))
        .route(
            "/{id}",
            get(semester::get_by_id)
                .put(semester::update)
                .delete(semester::delete),
        )
        // Same segment name as `/{id}` above: the router requires one
        // consistent parameter name per position.
        .nest("/{id}/courses", course_routes)
}
