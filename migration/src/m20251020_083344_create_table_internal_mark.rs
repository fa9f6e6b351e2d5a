use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InternalMark::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InternalMark::InternalMarkId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InternalMark::StudentId).uuid().not_null())
                    .col(ColumnDef::new(InternalMark::Semester).integer().not_null())
                    .col(
                        ColumnDef::new(InternalMark::Subject)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(InternalMark::MidExam1).integer().not_null())
                    .col(ColumnDef::new(InternalMark::MidExam2).integer().not_null())
                    .col(
                        ColumnDef::new(InternalMark::FinalMidExam)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InternalMark::LabInternal)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InternalMark::CreatedAt)
                            .date_time()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(InternalMark::UpdatedAt)
                            .date_time()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_internal_mark_student")
                            .from(InternalMark::Table, InternalMark::StudentId)
                            .to(Student::Table, Student::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_internal_mark_student_id")
                    .table(InternalMark::Table)
                    .col(InternalMark::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_internal_mark_student_id")
                    .table(InternalMark::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(InternalMark::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InternalMark {
    Table,
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

#[derive(DeriveIden)]
enum Student {
    Table,
    StudentId,
}
