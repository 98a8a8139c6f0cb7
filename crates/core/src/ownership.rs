//! Vocabulary types for the ownership verifier.
//!
//! The verifier itself lives in `tally-db` (it is a database query);
//! these types are shared so handlers can name the resource kind being
//! checked without depending on the query layer's internals.

use serde::{Deserialize, Serialize};

/// The four non-root entity kinds in the ownership chain
/// Grade -> Category -> Course -> Semester -> User.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Semester,
    Course,
    Category,
    Grade,
}

impl ResourceKind {
    /// Human-readable name used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Semester => "semester",
            ResourceKind::Course => "course",
            ResourceKind::Category => "category",
            ResourceKind::Grade => "grade",
        }
    }
}

/// Outcome of an ownership check.
///
/// `Denied` covers both "does not exist" and "exists but belongs to
/// someone else"; callers must not try to tell the two apart. Storage
/// faults are reported separately as errors, never as `Denied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Authorized,
    Denied,
}

impl Ownership {
    pub fn is_authorized(self) -> bool {
        matches!(self, Ownership::Authorized)
    }
}
