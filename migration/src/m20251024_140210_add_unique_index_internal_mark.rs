use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// One mark row per (student, semester, subject).
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("uq_internal_mark_student_semester_subject")
                    .table(InternalMark::Table)
                    .col(InternalMark::StudentId)
                    .col(InternalMark::Semester)
                    .col(InternalMark::Subject)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uq_internal_mark_student_semester_subject")
                    .table(InternalMark::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum InternalMark {
    Table,
    StudentId,
    Semester,
    Subject,
}
