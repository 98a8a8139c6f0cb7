//! Semester entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tally_core::types::{DbId, Timestamp};

/// Semester row. The root of a user's grade tree; everything below it
/// is owned transitively through this row's `owner_user_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Semester {
    pub id: DbId,
    pub owner_user_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a semester.
#[derive(Debug)]
pub struct CreateSemester {
    pub owner_user_id: DbId,
    pub name: String,
}

/// DTO for updating a semester. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSemester {
    pub name: Option<String>,
}
