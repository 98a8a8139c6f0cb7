//! Grade-category entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tally_core::types::{DbId, Timestamp};

/// Category row, owned transitively through course and semester.
///
/// `weight` is the category's relative contribution within its course;
/// weights across a course are not required to sum to any fixed total.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GradeCategory {
    pub id: DbId,
    pub course_id: DbId,
    pub name: String,
    pub weight: f64,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category.
#[derive(Debug)]
pub struct CreateCategory {
    pub course_id: DbId,
    pub name: String,
    pub weight: f64,
    pub description: String,
}

/// DTO for updating a category. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub description: Option<String>,
}
