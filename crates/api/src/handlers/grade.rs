//! Handlers for the `/grades` resource.
//!
//! Creation and listing are nested under a category:
//! `/categories/{category_id}/grades`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use tally_core::error::CoreError;
use tally_core::ownership::ResourceKind;
use tally_core::types::DbId;
use tally_db::models::grade::{CreateGrade, Grade, UpdateGrade};
use tally_db::repositories::GradeRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::require_ownership;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /categories/{category_id}/grades`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGradeRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "must be a non-negative number"))]
    pub weight: f64,
    #[validate(range(min = 0.0, message = "must be a non-negative number"))]
    pub points_achieved: f64,
    #[validate(range(exclusive_min = 0.0, message = "must be greater than zero"))]
    pub points_possible: f64,
    #[serde(default)]
    pub description: String,
    pub graded_on: Option<NaiveDate>,
}

/// Request body for `PUT /grades/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGradeRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "must be a non-negative number"))]
    pub weight: Option<f64>,
    #[validate(range(min = 0.0, message = "must be a non-negative number"))]
    pub points_achieved: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "must be greater than zero"))]
    pub points_possible: Option<f64>,
    pub description: Option<String>,
    pub graded_on: Option<NaiveDate>,
}

/// POST /api/v1/categories/{category_id}/grades
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(category_id): Path<DbId>,
    Json(input): Json<CreateGradeRequest>,
) -> AppResult<(StatusCode, Json<Grade>)> {
    input.validate().map_err(AppError::from_validation)?;
    // The grade does not exist yet; the gate checks the parent category.
    require_ownership(&state, &user, category_id, ResourceKind::Category).await?;

    if GradeRepo::name_exists(&state.pool, category_id, &input.name).await? {
        return Err(AppError::Core(CoreError::Conflict { name: input.name }));
    }

    let grade = GradeRepo::create(
        &state.pool,
        &CreateGrade {
            category_id,
            name: input.name,
            weight: input.weight,
            points_achieved: input.points_achieved,
            points_possible: input.points_possible,
            description: input.description,
            graded_on: input.graded_on,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(grade)))
}

/// GET /api/v1/categories/{category_id}/grades
pub async fn list_by_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(category_id): Path<DbId>,
) -> AppResult<Json<Vec<Grade>>> {
    require_ownership(&state, &user, category_id, ResourceKind::Category).await?;

    let grades = GradeRepo::list_by_category(&state.pool, category_id).await?;
    Ok(Json(grades))
}

/// GET /api/v1/grades/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Grade>> {
    require_ownership(&state, &user, id, ResourceKind::Grade).await?;

    let grade = GradeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::Denied))?;
    Ok(Json(grade))
}

/// PUT /api/v1/grades/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGradeRequest>,
) -> AppResult<Json<Grade>> {
    input.validate().map_err(AppError::from_validation)?;
    require_ownership(&state, &user, id, ResourceKind::Grade).await?;

    // A rename must not collide with a sibling grade.
    if let Some(new_name) = &input.name {
        let current = GradeRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::Denied))?;
        if *new_name != current.name
            && GradeRepo::name_exists(&state.pool, current.category_id, new_name).await?
        {
            return Err(AppError::Core(CoreError::Conflict {
                name: new_name.clone(),
            }));
        }
    }

    let grade = GradeRepo::update(
        &state.pool,
        id,
        &UpdateGrade {
            name: input.name,
            weight: input.weight,
            points_achieved: input.points_achieved,
            points_possible: input.points_possible,
            description: input.description,
            graded_on: input.graded_on,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::Denied))?;
    Ok(Json(grade))
}

/// DELETE /api/v1/grades/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_ownership(&state, &user, id, ResourceKind::Grade).await?;

    let deleted = GradeRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::Denied))
    }
}
