use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::student;

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub student_id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
    pub semester: i32,
    pub profile_image_url: Option<String>,
}

impl From<student::Model> for StudentResponse {
    fn from(student: student::Model) -> Self {
        Self {
            student_id: student.student_id,
            name: student.name,
            email: student.email,
            department: student.department,
            semester: student.semester,
            profile_image_url: student.profile_image_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentListResponse {
    pub total: usize,
    pub students: Vec<StudentResponse>,
}
