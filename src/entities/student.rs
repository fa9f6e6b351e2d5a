//! `SeaORM` Entity for student table

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "student"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub student_id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
    pub semester: i32,
    pub user_id: Option<Uuid>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    StudentId,
    Name,
    Email,
    Department,
    Semester,
    UserId,
    ProfileImageUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    StudentId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    InternalMark,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::StudentId => ColumnType::Uuid.def(),
            Self::Name => ColumnType::String(StringLen::N(100u32)).def(),
            Self::Email => ColumnType::String(StringLen::N(100u32)).def().unique(),
            Self::Department => ColumnType::String(StringLen::N(50u32)).def(),
            Self::Semester => ColumnType::Integer.def(),
            Self::UserId => ColumnType::Uuid.def().null(),
            Self::ProfileImageUrl => ColumnType::String(StringLen::N(255u32)).def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::User => Entity::belongs_to(super::user::Entity)
                .from(Column::UserId)
                .to(super::user::Column::UserId)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Self::InternalMark => Entity::has_many(super::internal_mark::Entity).into(),
        }
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::internal_mark::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InternalMark.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
