//! Graded-item entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tally_core::types::{DbId, Timestamp};

/// Grade row, the leaf of the ownership chain.
///
/// `points_possible` is guaranteed positive by a check constraint;
/// `weight` is the item's relative weight within its category.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Grade {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub weight: f64,
    pub points_achieved: f64,
    pub points_possible: f64,
    pub description: String,
    pub graded_on: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a grade.
#[derive(Debug)]
pub struct CreateGrade {
    pub category_id: DbId,
    pub name: String,
    pub weight: f64,
    pub points_achieved: f64,
    pub points_possible: f64,
    pub description: String,
    pub graded_on: Option<NaiveDate>,
}

/// DTO for updating a grade. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGrade {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub points_achieved: Option<f64>,
    pub points_possible: Option<f64>,
    pub description: Option<String>,
    pub graded_on: Option<NaiveDate>,
}
