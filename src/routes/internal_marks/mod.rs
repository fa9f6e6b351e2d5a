pub mod dto;
pub mod route;

pub use route::{create_student_route, create_teacher_route};
