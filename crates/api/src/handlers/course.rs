//! Handlers for the `/courses` resource.
//!
//! Creation and listing are nested under a semester:
//! `/semesters/{semester_id}/courses`. A course `GET` returns the full
//! Category -> Grade tree with aggregates computed fresh from the raw
//! rows; nothing derived is ever persisted.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tally_core::error::CoreError;
use tally_core::grading::{
    category_totals, course_totals, CategorySnapshot, CategoryTotals, CourseTotals, GradeSnapshot,
};
use tally_core::ownership::ResourceKind;
use tally_core::types::DbId;
use tally_db::models::category::GradeCategory;
use tally_db::models::course::{Course, CreateCourse, UpdateCourse};
use tally_db::models::grade::Grade;
use tally_db::repositories::{CategoryRepo, CourseRepo, GradeRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::require_ownership;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /semesters/{semester_id}/courses`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub credits: i32,
    #[serde(default)]
    pub description: String,
}

/// Request body for `PUT /courses/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub credits: Option<i32>,
    pub description: Option<String>,
}

/// One category with its grades and derived totals, inside a course view.
#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub category: GradeCategory,
    pub grades: Vec<Grade>,
    pub totals: CategoryTotals,
}

/// Full nested course response: the course row, every category with its
/// grades and totals, and the course-level aggregate.
#[derive(Debug, Serialize)]
pub struct CourseView {
    pub course: Course,
    pub categories: Vec<CategoryView>,
    pub totals: CourseTotals,
}

/// POST /api/v1/semesters/{semester_id}/courses
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(semester_id): Path<DbId>,
    Json(input): Json<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<Course>)> {
    input.validate().map_err(AppError::from_validation)?;
    // The course does not exist yet; the gate checks the parent semester.
    require_ownership(&state, &user, semester_id, ResourceKind::Semester).await?;

    if CourseRepo::name_exists(&state.pool, semester_id, &input.name).await? {
        return Err(AppError::Core(CoreError::Conflict { name: input.name }));
    }

    let course = CourseRepo::create(
        &state.pool,
        &CreateCourse {
            semester_id,
            name: input.name,
            credits: input.credits,
            description: input.description,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/v1/semesters/{semester_id}/courses
pub async fn list_by_semester(
    State(state): State<AppState>,
    user: AuthUser,
    Path(semester_id): Path<DbId>,
) -> AppResult<Json<Vec<Course>>> {
    require_ownership(&state, &user, semester_id, ResourceKind::Semester).await?;

    let courses = CourseRepo::list_by_semester(&state.pool, semester_id).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/{id}
///
/// Returns the nested Category -> Grade tree plus computed aggregates.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CourseView>> {
    require_ownership(&state, &user, id, ResourceKind::Course).await?;

    let course = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::Denied))?;

    let categories = CategoryRepo::list_by_course(&state.pool, id).await?;

    // One query for all grades in the course, then group in memory.
    let mut grades_by_category: HashMap<DbId, Vec<Grade>> = HashMap::new();
    for grade in GradeRepo::list_by_course(&state.pool, id).await? {
        grades_by_category
            .entry(grade.category_id)
            .or_default()
            .push(grade);
    }

    let mut views = Vec::with_capacity(categories.len());
    let mut snapshots = Vec::with_capacity(categories.len());
    for category in categories {
        let grades = grades_by_category.remove(&category.id).unwrap_or_default();
        let snapshot = CategorySnapshot {
            weight: category.weight,
            grades: grades.iter().map(grade_snapshot).collect(),
        };
        let totals = category_totals(snapshot.weight, &snapshot.grades);
        snapshots.push(snapshot);
        views.push(CategoryView {
            category,
            grades,
            totals,
        });
    }

    let totals = course_totals(&snapshots, &state.gpa_scale);

    Ok(Json(CourseView {
        course,
        categories: views,
        totals,
    }))
}

/// PUT /api/v1/courses/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourseRequest>,
) -> AppResult<Json<Course>> {
    input.validate().map_err(AppError::from_validation)?;
    require_ownership(&state, &user, id, ResourceKind::Course).await?;

    // A rename must not collide with a sibling course.
    if let Some(new_name) = &input.name {
        let current = CourseRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::Denied))?;
        if *new_name != current.name
            && CourseRepo::name_exists(&state.pool, current.semester_id, new_name).await?
        {
            return Err(AppError::Core(CoreError::Conflict {
                name: new_name.clone(),
            }));
        }
    }

    let course = CourseRepo::update(
        &state.pool,
        id,
        &UpdateCourse {
            name: input.name,
            credits: input.credits,
            description: input.description,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::Denied))?;
    Ok(Json(course))
}

/// DELETE /api/v1/courses/{id}
///
/// Cascades to the course's categories and grades.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_ownership(&state, &user, id, ResourceKind::Course).await?;

    let deleted = CourseRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::Denied))
    }
}

/// Project a grade row onto the aggregation engine's input type.
fn grade_snapshot(grade: &Grade) -> GradeSnapshot {
    GradeSnapshot {
        achieved: grade.points_achieved,
        possible: grade.points_possible,
        weight: grade.weight,
    }
}
