//! `SeaORM` Entity for internal_mark table
//!
//! Logical identity is (student_id, semester, subject), backed by the
//! `uq_internal_mark_student_semester_subject` unique index.

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "internal_mark"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub internal_mark_id: Uuid,
    pub student_id: Uuid,
    pub semester: i32,
    pub subject: String,
    pub mid_exam1: i32,
    pub mid_exam2: i32,
    pub final_mid_exam: i32,
    pub lab_internal: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    InternalMarkId,
    StudentId,
    Semester,
    Subject,
    MidExam1,
    MidExam2,
    FinalMidExam,
    LabInternal,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    InternalMarkId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::InternalMarkId => ColumnType::Uuid.def(),
            Self::StudentId => ColumnType::Uuid.def(),
            Self::Semester => ColumnType::Integer.def(),
            Self::Subject => ColumnType::String(StringLen::N(100u32)).def(),
            Self::MidExam1 => ColumnType::Integer.def(),
            Self::MidExam2 => ColumnType::Integer.def(),
            Self::FinalMidExam => ColumnType::Integer.def(),
            Self::LabInternal => ColumnType::Integer.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Student => Entity::belongs_to(super::student::Entity)
                .from(Column::StudentId)
                .to(super::student::Column::StudentId)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
