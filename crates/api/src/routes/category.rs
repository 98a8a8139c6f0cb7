//! Route definitions for the `/categories` resource.
//!
//! Category creation lives under `/courses/{course_id}/categories`;
//! this router covers id-addressed operations and nests grade routes
//! under `/categories/{category_id}/grades`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{category, grade};
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /{id}                          -> get_by_id (grades + totals)
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
///
/// GET    /{id}/grades                   -> list_by_category
/// POST   /{id}/grades                   -> create
/// ```
pub fn router() -> Router<AppState> {
    let grade_routes = Router::new().route(
        "/",
        get(grade::list_by_category).post(grade::create),
    );

    Router::new()
        .route(
            "/{id}",
            get(category::get_by_id)
                .put(category::update)
                .delete(category::delete),
        )
        // Same segment name as `/{id}` above: the router requires one
        // consistent parameter name per position.
        .nest("/{id}/grades", grade_routes)
}
