//! Repository for the `grades` table.

use sqlx::PgPool;
use tally_core::types::DbId;

use crate::models::grade::{CreateGrade, Grade, UpdateGrade};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, name, weight, points_achieved, points_possible, \
                       description, graded_on, created_at, updated_at";

/// Provides CRUD operations for graded items.
pub struct GradeRepo;

impl GradeRepo {
    /// Insert a new grade, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateGrade) -> Result<Grade, sqlx::Error> {
        let query = format!(
            "INSERT INTO grades (category_id, name, weight, points_achieved,
                                 points_possible, description, graded_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(input.weight)
            .bind(input.points_achieved)
            .bind(input.points_possible)
            .bind(&input.description)
            .bind(input.graded_on)
            .fetch_one(pool)
            .await
    }

    /// Find a grade by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Grade>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grades WHERE id = $1");
        sqlx::query_as::<_, Grade>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all grades in a category, oldest first.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Grade>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grades WHERE category_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// List every grade under a course in one query, grouped by the
    /// caller. Used to assemble the nested course view without issuing
    /// one query per category.
    pub async fn list_by_course(pool: &PgPool, course_id: DbId) -> Result<Vec<Grade>, sqlx::Error> {
        let query = "SELECT g.id, g.category_id, g.name, g.weight, g.points_achieved,
                    g.points_possible, g.description, g.graded_on, g.created_at, g.updated_at
             FROM grades g
             JOIN grade_categories gc ON gc.id = g.category_id
             WHERE gc.course_id = $1
             ORDER BY g.category_id, g.created_at, g.id";
        sqlx::query_as::<_, Grade>(query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Check whether the category already has a grade with this name.
    pub async fn name_exists(
        pool: &PgPool,
        category_id: DbId,
        name: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM grades WHERE category_id = $1 AND name = $2)",
        )
        .bind(category_id)
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Update a grade. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGrade,
    ) -> Result<Option<Grade>, sqlx::Error> {
        let query = format!(
            "UPDATE grades SET
                name = COALESCE($2, name),
                weight = COALESCE($3, weight),
                points_achieved = COALESCE($4, points_achieved),
                points_possible = COALESCE($5, points_possible),
                description = COALESCE($6, description),
                graded_on = COALESCE($7, graded_on),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.weight)
            .bind(input.points_achieved)
            .bind(input.points_possible)
            .bind(&input.description)
            .bind(input.graded_on)
            .fetch_optional(pool)
            .await
    }

    /// Delete a grade. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
