pub mod auth;
pub mod category;
pub mod course;
pub mod grade;
pub mod health;
pub mod semester;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/account                        delete account (requires auth)
///
/// /semesters                           list, create
/// /semesters/{id}                      get, update, delete
/// /semesters/{semester_id}/courses     list, create
///
/// /courses/{id}                        get (nested tree + aggregates), update, delete
/// /courses/{course_id}/categories      list, create
///
/// /categories/{id}                     get (grades + totals), update, delete
/// /categories/{category_id}/grades     list, create
///
/// /grades/{id}                         get, update, delete
/// ```
///
/// Every route below `/auth` requires a Bearer token; the resource
/// handlers additionally gate each id on the ownership chain.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/semesters", semester::router())
        .nest("/courses", course::router())
        .nest("/categories", category::router())
        .nest("/grades", grade::router())
}
