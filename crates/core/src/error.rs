#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Missing, malformed, or expired credential.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Resource missing or not owned by the caller. The two cases are
    /// intentionally indistinguishable so unauthorized callers cannot
    /// probe which resource ids exist.
    #[error("Access denied")]
    Denied,

    /// A request field failed validation before any storage access.
    #[error("Validation failed on '{field}': {message}")]
    Validation { field: String, message: String },

    /// Sibling-name uniqueness violation on create or rename.
    #[error("Conflict: '{name}' already exists in this scope")]
    Conflict { name: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
