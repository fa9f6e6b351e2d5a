use crate::entities::student;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DeleteResult, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub department: String,
    pub semester: i32,
    pub user_id: Option<Uuid>,
    pub profile_image_url: Option<String>,
}

pub struct StudentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StudentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, student_id: Uuid) -> Result<Option<student::Model>> {
        let student = student::Entity::find_by_id(student_id).one(self.db).await?;
        Ok(student)
    }

    /// Exact, case-sensitive match on the student's email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<student::Model>> {
        let student = student::Entity::find()
            .filter(student::Column::Email.eq(email))
            .one(self.db)
            .await?;
        Ok(student)
    }

    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<student::Model>> {
        let student = student::Entity::find()
            .filter(student::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;
        Ok(student)
    }

    pub async fn find_all(&self) -> Result<Vec<student::Model>> {
        let students = student::Entity::find()
            .order_by_asc(student::Column::Name)
            .order_by_asc(student::Column::Email)
            .all(self.db)
            .await?;
        Ok(students)
    }

    pub async fn create(&self, new_student: NewStudent) -> Result<student::Model> {
        let now = chrono::Utc::now().naive_utc();
        let student_model = student::ActiveModel {
            student_id: Set(Uuid::new_v4()),
            name: Set(new_student.name),
            email: Set(new_student.email),
            department: Set(new_student.department),
            semester: Set(new_student.semester),
            user_id: Set(new_student.user_id),
            profile_image_url: Set(new_student.profile_image_url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = student_model.insert(self.db).await?;
        Ok(result)
    }

    /// Marks of the student go with it (`ON DELETE CASCADE`).
    pub async fn delete(&self, student_id: Uuid) -> Result<DeleteResult> {
        let result = student::Entity::delete_by_id(student_id)
            .exec(self.db)
            .await?;
        Ok(result)
    }
}
