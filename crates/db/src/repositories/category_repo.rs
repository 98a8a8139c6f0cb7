//! Repository for the `grade_categories` table.

use sqlx::PgPool;
use tally_core::types::DbId;

use crate::models::category::{CreateCategory, GradeCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, name, weight, description, created_at, updated_at";

/// Provides CRUD operations for grade categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCategory,
    ) -> Result<GradeCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO grade_categories (course_id, name, weight, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GradeCategory>(&query)
            .bind(input.course_id)
            .bind(&input.name)
            .bind(input.weight)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a category by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GradeCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grade_categories WHERE id = $1");
        sqlx::query_as::<_, GradeCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories in a course, in name order.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<GradeCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grade_categories WHERE course_id = $1 ORDER BY name"
        );
        sqlx::query_as::<_, GradeCategory>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Check whether the course already has a category with this name.
    pub async fn name_exists(
        pool: &PgPool,
        course_id: DbId,
        name: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM grade_categories WHERE course_id = $1 AND name = $2)",
        )
        .bind(course_id)
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Update a category. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<GradeCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE grade_categories SET
                name = COALESCE($2, name),
                weight = COALESCE($3, weight),
                description = COALESCE($4, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GradeCategory>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.weight)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Cascades to its grades.
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM grade_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
