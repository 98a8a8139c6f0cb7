//! Handlers for the `/categories` resource.
//!
//! Creation and listing are nested under a course:
//! `/courses/{course_id}/categories`. A category `GET` includes its
//! grades and freshly computed totals.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tally_core::error::CoreError;
use tally_core::grading::{category_totals, CategoryTotals, GradeSnapshot};
use tally_core::ownership::ResourceKind;
use tally_core::types::DbId;
use tally_db::models::category::{CreateCategory, GradeCategory, UpdateCategory};
use tally_db::models::grade::Grade;
use tally_db::repositories::{CategoryRepo, GradeRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::require_ownership;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /courses/{course_id}/categories`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "must be a non-negative number"))]
    pub weight: f64,
    #[serde(default)]
    pub description: String,
}

/// Request body for `PUT /categories/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "must be a non-negative number"))]
    pub weight: Option<f64>,
    pub description: Option<String>,
}

/// A category with its grades and derived totals.
#[derive(Debug, Serialize)]
pub struct CategoryDetail {
    pub category: GradeCategory,
    pub grades: Vec<Grade>,
    pub totals: CategoryTotals,
}

/// POST /api/v1/courses/{course_id}/categories
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<GradeCategory>)> {
    input.validate().map_err(AppError::from_validation)?;
    // The category does not exist yet; the gate checks the parent course.
    require_ownership(&state, &user, course_id, ResourceKind::Course).await?;

    if CategoryRepo::name_exists(&state.pool, course_id, &input.name).await? {
        return Err(AppError::Core(CoreError::Conflict { name: input.name }));
    }

    let category = CategoryRepo::create(
        &state.pool,
        &CreateCategory {
            course_id,
            name: input.name,
            weight: input.weight,
            description: input.description,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/courses/{course_id}/categories
pub async fn list_by_course(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<Vec<GradeCategory>>> {
    require_ownership(&state, &user, course_id, ResourceKind::Course).await?;

    let categories = CategoryRepo::list_by_course(&state.pool, course_id).await?;
    Ok(Json(categories))
}

/// GET /api/v1/categories/{id}
///
/// Returns the category, its grades, and computed totals.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CategoryDetail>> {
    require_ownership(&state, &user, id, ResourceKind::Category).await?;

    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::Denied))?;

    let grades = GradeRepo::list_by_category(&state.pool, id).await?;

    let snapshots: Vec<GradeSnapshot> = grades
        .iter()
        .map(|g| GradeSnapshot {
            achieved: g.points_achieved,
            possible: g.points_possible,
            weight: g.weight,
        })
        .collect();
    let totals = category_totals(category.weight, &snapshots);

    Ok(Json(CategoryDetail {
        category,
        grades,
        totals,
    }))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategoryRequest>,
) -> AppResult<Json<GradeCategory>> {
    input.validate().map_err(AppError::from_validation)?;
    require_ownership(&state, &user, id, ResourceKind::Category).await?;

    // A rename must not collide with a sibling category.
    if let Some(new_name) = &input.name {
        let current = CategoryRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::Denied))?;
        if *new_name != current.name
            && CategoryRepo::name_exists(&state.pool, current.course_id, new_name).await?
        {
            return Err(AppError::Core(CoreError::Conflict {
                name: new_name.clone(),
            }));
        }
    }

    let category = CategoryRepo::update(
        &state.pool,
        id,
        &UpdateCategory {
            name: input.name,
            weight: input.weight,
            description: input.description,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::Denied))?;
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Cascades to the category's grades.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_ownership(&state, &user, id, ResourceKind::Category).await?;

    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::Denied))
    }
}
