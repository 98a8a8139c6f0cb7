//! Route definitions for the `/grades` resource.
//!
//! Grade creation lives under `/categories/{category_id}/grades`; this
//! router covers id-addressed operations only.

use axum::routing::get;
use axum::Router;

use crate::handlers::grade;
use crate::state::AppState;

/// Routes mounted at `/grades`.
///
/// ```text
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(grade::get_by_id)
            .put(grade::update)
            .delete(grade::delete),
    )
}
