//! Integration tests for the ownership gate.
//!
//! Covers transitive denial across the whole chain, the deliberate
//! indistinguishability of "missing" and "not owned", and the rule that
//! creation checks the parent resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete, get, post_json, put_json, register_user, seed_course_tree,
};
use sqlx::PgPool;

/// Build one user's full tree and return a grade id at the bottom of it.
async fn seed_grade(pool: &PgPool, token: &str, category_id: i64) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/categories/{category_id}/grades"),
        token,
        serde_json::json!({
            "name": "Quiz 1",
            "weight": 5.0,
            "points_achieved": 4.0,
            "points_possible": 8.0,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_owner_can_read_every_level(pool: PgPool) {
    let (token, _, _) = register_user(&pool, "alice").await;
    let (semester_id, course_id, category_id) = seed_course_tree(&pool, &token).await;
    let grade_id = seed_grade(&pool, &token, category_id).await;

    for uri in [
        format!("/api/v1/semesters/{semester_id}"),
        format!("/api/v1/courses/{course_id}"),
        format!("/api/v1/categories/{category_id}"),
        format!("/api/v1/grades/{grade_id}"),
    ] {
        let response = get(build_test_app(pool.clone()), &uri, &token).await;
        assert_eq!(response.status(), StatusCode::OK, "owner denied at {uri}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_foreign_user_is_denied_at_every_level(pool: PgPool) {
    let (owner_token, _, _) = register_user(&pool, "alice").await;
    let (semester_id, course_id, category_id) = seed_course_tree(&pool, &owner_token).await;
    let grade_id = seed_grade(&pool, &owner_token, category_id).await;

    let (intruder_token, _, _) = register_user(&pool, "mallory").await;

    for uri in [
        format!("/api/v1/semesters/{semester_id}"),
        format!("/api/v1/courses/{course_id}"),
        format!("/api/v1/categories/{category_id}"),
        format!("/api/v1/grades/{grade_id}"),
    ] {
        let response = get(build_test_app(pool.clone()), &uri, &intruder_token).await;
        assert_eq!(
            response.status(),
            StatusCode::FORBIDDEN,
            "intruder not denied at {uri}"
        );
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_and_foreign_are_indistinguishable(pool: PgPool) {
    let (owner_token, _, _) = register_user(&pool, "alice").await;
    let (_, course_id, _) = seed_course_tree(&pool, &owner_token).await;

    let (intruder_token, _, _) = register_user(&pool, "mallory").await;

    // A course that belongs to someone else.
    let foreign = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}"),
        &intruder_token,
    )
    .await;
    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);
    let foreign_body = body_json(foreign).await;

    // A course id that does not exist at all.
    let missing = get(
        build_test_app(pool),
        "/api/v1/courses/999999",
        &intruder_token,
    )
    .await;
    assert_eq!(missing.status(), StatusCode::FORBIDDEN);
    let missing_body = body_json(missing).await;

    // Same status, same body: no field may reveal whether the id exists.
    assert_eq!(foreign_body, missing_body);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_foreign_user_cannot_mutate(pool: PgPool) {
    let (owner_token, _, _) = register_user(&pool, "alice").await;
    let (semester_id, course_id, category_id) = seed_course_tree(&pool, &owner_token).await;
    let grade_id = seed_grade(&pool, &owner_token, category_id).await;

    let (intruder_token, _, _) = register_user(&pool, "mallory").await;

    // Updates are denied...
    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/grades/{grade_id}"),
        &intruder_token,
        serde_json::json!({"points_achieved": 8.0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // ...deletes are denied...
    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/semesters/{semester_id}"),
        &intruder_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // ...and creating under a foreign parent is denied (the parent is
    // what gets checked, since the child does not exist yet).
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/categories"),
        &intruder_token,
        serde_json::json!({"name": "Sneaky", "weight": 10.0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The owner's data is untouched.
    let response = get(
        build_test_app(pool),
        &format!("/api/v1/grades/{grade_id}"),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["points_achieved"], 4.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_semester_list_only_shows_own_rows(pool: PgPool) {
    let (alice_token, _, _) = register_user(&pool, "alice").await;
    seed_course_tree(&pool, &alice_token).await;

    let (mallory_token, _, _) = register_user(&pool, "mallory").await;

    let response = get(build_test_app(pool), "/api/v1/semesters", &mallory_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}
