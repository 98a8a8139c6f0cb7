//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. [`OwnershipRepo`] is
//! the ownership verifier every mutator consults before touching a
//! non-root entity.

pub mod category_repo;
pub mod course_repo;
pub mod grade_repo;
pub mod ownership;
pub mod semester_repo;
pub mod session_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use course_repo::CourseRepo;
pub use grade_repo::GradeRepo;
pub use ownership::OwnershipRepo;
pub use semester_repo::SemesterRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
