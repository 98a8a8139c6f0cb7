//! Course entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tally_core::types::{DbId, Timestamp};

/// Course row, owned transitively through its semester.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub semester_id: DbId,
    pub name: String,
    pub credits: i32,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a course.
#[derive(Debug)]
pub struct CreateCourse {
    pub semester_id: DbId,
    pub name: String,
    pub credits: i32,
    pub description: String,
}

/// DTO for updating a course. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCourse {
    pub name: Option<String>,
    pub credits: Option<i32>,
    pub description: Option<String>,
}
