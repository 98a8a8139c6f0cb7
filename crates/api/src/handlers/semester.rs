//! Handlers for the `/semesters` resource.
//!
//! Semesters are the root of a user's grade tree: listing is scoped to
//! the authenticated caller, and everything else goes through the
//! ownership gate.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tally_core::error::CoreError;
use tally_core::ownership::ResourceKind;
use tally_core::types::DbId;
use tally_db::models::semester::{CreateSemester, Semester, UpdateSemester};
use tally_db::repositories::SemesterRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::require_ownership;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /semesters`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSemesterRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
}

/// Request body for `PUT /semesters/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSemesterRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
}

/// POST /api/v1/semesters
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateSemesterRequest>,
) -> AppResult<(StatusCode, Json<Semester>)> {
    input.validate().map_err(AppError::from_validation)?;

    if SemesterRepo::name_exists(&state.pool, user.user_id, &input.name).await? {
        return Err(AppError::Core(CoreError::Conflict { name: input.name }));
    }

    let semester = SemesterRepo::create(
        &state.pool,
        &CreateSemester {
            owner_user_id: user.user_id,
            name: input.name,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(semester)))
}

/// GET /api/v1/semesters
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Semester>>> {
    let semesters = SemesterRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(semesters))
}

/// GET /api/v1/semesters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Semester>> {
    require_ownership(&state, &user, id, ResourceKind::Semester).await?;

    let semester = SemesterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::Denied))?;
    Ok(Json(semester))
}

/// PUT /api/v1/semesters/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSemesterRequest>,
) -> AppResult<Json<Semester>> {
    input.validate().map_err(AppError::from_validation)?;
    require_ownership(&state, &user, id, ResourceKind::Semester).await?;

    // A rename must not collide with a sibling semester.
    if let Some(new_name) = &input.name {
        let current = SemesterRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::Denied))?;
        if *new_name != current.name
            && SemesterRepo::name_exists(&state.pool, user.user_id, new_name).await?
        {
            return Err(AppError::Core(CoreError::Conflict {
                name: new_name.clone(),
            }));
        }
    }

    let semester = SemesterRepo::update(&state.pool, id, &UpdateSemester { name: input.name })
        .await?
        .ok_or(AppError::Core(CoreError::Denied))?;
    Ok(Json(semester))
}

/// DELETE /api/v1/semesters/{id}
///
/// Cascades to every course, category, and grade in the semester.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_ownership(&state, &user, id, ResourceKind::Semester).await?;

    let deleted = SemesterRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::Denied))
    }
}
