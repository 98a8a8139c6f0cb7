//! Repository for the `semesters` table.

use sqlx::PgPool;
use tally_core::types::DbId;

use crate::models::semester::{CreateSemester, Semester, UpdateSemester};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_user_id, name, created_at, updated_at";

/// Provides CRUD operations for semesters.
pub struct SemesterRepo;

impl SemesterRepo {
    /// Insert a new semester, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSemester) -> Result<Semester, sqlx::Error> {
        let query = format!(
            "INSERT INTO semesters (owner_user_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Semester>(&query)
            .bind(input.owner_user_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a semester by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Semester>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM semesters WHERE id = $1");
        sqlx::query_as::<_, Semester>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's semesters, most recently created first.
    pub async fn list_by_owner(pool: &PgPool, owner_user_id: DbId) -> Result<Vec<Semester>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM semesters
             WHERE owner_user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Semester>(&query)
            .bind(owner_user_id)
            .fetch_all(pool)
            .await
    }

    /// Check whether the owner already has a semester with this name.
    pub async fn name_exists(
        pool: &PgPool,
        owner_user_id: DbId,
        name: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM semesters WHERE owner_user_id = $1 AND name = $2)",
        )
        .bind(owner_user_id)
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Update a semester. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSemester,
    ) -> Result<Option<Semester>, sqlx::Error> {
        let query = format!(
            "UPDATE semesters SET
                name = COALESCE($2, name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Semester>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a semester. Cascades to courses, categories, and grades.
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM semesters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
