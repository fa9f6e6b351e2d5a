pub mod auth;
pub mod health;
pub mod internal_marks;
pub mod students;
pub mod users;
