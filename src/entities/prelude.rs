pub use super::internal_mark::Entity as InternalMark;
pub use super::student::Entity as Student;
pub use super::user::Entity as User;
