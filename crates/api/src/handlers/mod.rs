//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input first, then clear the ownership gate via
//! [`require_ownership`], and only then touch a repository. Reads that
//! return nested grade structures call `tally_core::grading` for the
//! derived statistics.

use tally_core::error::CoreError;
use tally_core::ownership::ResourceKind;
use tally_core::types::DbId;
use tally_db::repositories::OwnershipRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub mod auth;
pub mod category;
pub mod course;
pub mod grade;
pub mod semester;

/// Verify the caller transitively owns `resource_id`, or fail the
/// request with the uniform access-denied error.
///
/// Must be called before any read or mutation of a non-root entity.
/// For creates, the id checked is the *parent* resource, since the
/// child does not exist yet.
pub(crate) async fn require_ownership(
    state: &AppState,
    user: &AuthUser,
    resource_id: DbId,
    kind: ResourceKind,
) -> AppResult<()> {
    if OwnershipRepo::verify(&state.pool, user.user_id, resource_id, kind)
        .await?
        .is_authorized()
    {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Denied))
    }
}
