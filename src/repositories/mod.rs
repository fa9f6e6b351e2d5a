pub mod internal_mark_repository;
pub mod student_repository;
pub mod user_repository;

pub use internal_mark_repository::{InternalMarkRepository, InternalMarkValues, UpsertAction};
pub use student_repository::{NewStudent, StudentRepository};
pub use user_repository::{DeletedAccount, UserRepository};
