//! Domain logic for the tally grade tracker.
//!
//! Pure code only: the grade aggregation engine, the shared error
//! taxonomy, and the vocabulary types used by the persistence and API
//! layers. No I/O happens in this crate.

pub mod error;
pub mod grading;
pub mod ownership;
pub mod types;
