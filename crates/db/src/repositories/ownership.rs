//! The ownership verifier.
//!
//! Answers one question: is a given resource transitively owned by a
//! given user? Each resource kind maps to a single set-membership
//! `SELECT EXISTS` query that walks the chain
//! Grade -> Category -> Course -> Semester -> User; the four kinds
//! differ only in how many joins that walk takes.

use sqlx::PgPool;
use tally_core::ownership::{Ownership, ResourceKind};
use tally_core::types::DbId;

/// Join chains up to the owning user, one per resource kind. A semester
/// is a direct owner-column equality; a grade needs the full walk.
const SEMESTER_OWNED: &str = "SELECT EXISTS (
    SELECT 1 FROM semesters s
    WHERE s.id = $1 AND s.owner_user_id = $2
)";

const COURSE_OWNED: &str = "SELECT EXISTS (
    SELECT 1 FROM courses c
    JOIN semesters s ON s.id = c.semester_id
    WHERE c.id = $1 AND s.owner_user_id = $2
)";

const CATEGORY_OWNED: &str = "SELECT EXISTS (
    SELECT 1 FROM grade_categories gc
    JOIN courses c ON c.id = gc.course_id
    JOIN semesters s ON s.id = c.semester_id
    WHERE gc.id = $1 AND s.owner_user_id = $2
)";

const GRADE_OWNED: &str = "SELECT EXISTS (
    SELECT 1 FROM grades g
    JOIN grade_categories gc ON gc.id = g.category_id
    JOIN courses c ON c.id = gc.course_id
    JOIN semesters s ON s.id = c.semester_id
    WHERE g.id = $1 AND s.owner_user_id = $2
)";

/// Verifies transitive ownership of resources.
pub struct OwnershipRepo;

impl OwnershipRepo {
    /// Check whether `resource_id` of the given kind is reachable from
    /// `user_id`'s semesters.
    ///
    /// Returns [`Ownership::Denied`] both when the resource does not
    /// exist and when it belongs to another user; the caller cannot and
    /// must not distinguish the two. Database faults propagate as
    /// `sqlx::Error` and are never folded into `Denied`.
    pub async fn verify(
        pool: &PgPool,
        user_id: DbId,
        resource_id: DbId,
        kind: ResourceKind,
    ) -> Result<Ownership, sqlx::Error> {
        let query = match kind {
            ResourceKind::Semester => SEMESTER_OWNED,
            ResourceKind::Course => COURSE_OWNED,
            ResourceKind::Category => CATEGORY_OWNED,
            ResourceKind::Grade => GRADE_OWNED,
        };

        let owned: bool = sqlx::query_scalar(query)
            .bind(resource_id)
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        if owned {
            Ok(Ownership::Authorized)
        } else {
            tracing::debug!(
                user_id,
                resource_id,
                kind = kind.as_str(),
                "ownership check denied"
            );
            Ok(Ownership::Denied)
        }
    }
}
