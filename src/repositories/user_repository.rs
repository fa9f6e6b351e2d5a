use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::user;
use crate::repositories::StudentRepository;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct DeletedAccount {
    pub user: user::Model,
    pub student_id: Option<Uuid>,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<user::Model>> {
        let user = user::Entity::find_by_id(user_id).one(self.db).await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db)
            .await?;
        Ok(user)
    }

    pub async fn find_all(&self) -> Result<Vec<user::Model>> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::Email)
            .all(self.db)
            .await?;
        Ok(users)
    }

    /// `password` must already be a bcrypt hash.
    pub async fn create(
        &self,
        user_id: Uuid,
        email: String,
        password: String,
        role: RoleEnum,
    ) -> Result<user::Model> {
        let now = chrono::Utc::now().naive_utc();
        let user_model = user::ActiveModel {
            user_id: Set(user_id),
            email: Set(email),
            password: Set(password),
            role: Set(role),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = user_model.insert(self.db).await?;
        Ok(result)
    }
}

impl<'a, C: ConnectionTrait + TransactionTrait> UserRepository<'a, C> {
    /// Removes the account and the student profile linked to it in one
    /// transaction; the student's internal marks are removed with it.
    /// Returns `None` when there is no such user.
    pub async fn delete_account(&self, user_id: Uuid) -> Result<Option<DeletedAccount>> {
        let txn = self.db.begin().await?;

        let Some(user) = user::Entity::find_by_id(user_id).one(&txn).await? else {
            return Ok(None);
        };

        let student_repo = StudentRepository::new(&txn);
        let student_id = student_repo
            .find_by_user_id(user_id)
            .await?
            .map(|student| student.student_id);
        if let Some(student_id) = student_id {
            student_repo.delete(student_id).await?;
        }

        user::Entity::delete_by_id(user_id).exec(&txn).await?;
        txn.commit().await?;

        Ok(Some(DeletedAccount { user, student_id }))
    }
}
