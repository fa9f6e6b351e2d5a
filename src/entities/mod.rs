pub mod prelude;

pub mod internal_mark;
pub mod sea_orm_active_enums;
pub mod student;
pub mod user;
