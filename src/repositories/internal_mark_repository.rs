use crate::entities::internal_mark;
use anyhow::{Result, anyhow};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

/// Field values written by an upsert. `semester` and `subject` are part of
/// the natural key together with the owning student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalMarkValues {
    pub semester: i32,
    pub subject: String,
    pub mid_exam1: i32,
    pub mid_exam2: i32,
    pub final_mid_exam: i32,
    pub lab_internal: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Inserted,
    Updated,
}

pub struct InternalMarkRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InternalMarkRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Subject is compared exactly as stored: no case folding, no trimming.
    pub async fn find_by_natural_key(
        &self,
        student_id: Uuid,
        semester: i32,
        subject: &str,
    ) -> Result<Option<internal_mark::Model>> {
        let mark = internal_mark::Entity::find()
            .filter(internal_mark::Column::StudentId.eq(student_id))
            .filter(internal_mark::Column::Semester.eq(semester))
            .filter(internal_mark::Column::Subject.eq(subject))
            .one(self.db)
            .await?;
        Ok(mark)
    }

    pub async fn find_by_student_id(&self, student_id: Uuid) -> Result<Vec<internal_mark::Model>> {
        let marks = internal_mark::Entity::find()
            .filter(internal_mark::Column::StudentId.eq(student_id))
            .order_by_asc(internal_mark::Column::Semester)
            .order_by_asc(internal_mark::Column::Subject)
            .all(self.db)
            .await?;
        Ok(marks)
    }

    /// Updates the mark matching (student, semester, subject) or inserts a
    /// new one. The insert path carries an ON CONFLICT clause on the unique
    /// index, so a row created concurrently for the same key is overwritten
    /// instead of duplicated.
    pub async fn upsert(
        &self,
        student_id: Uuid,
        values: &InternalMarkValues,
    ) -> Result<(internal_mark::Model, UpsertAction)> {
        let now = Utc::now().naive_utc();

        if let Some(existing) = self
            .find_by_natural_key(student_id, values.semester, &values.subject)
            .await?
        {
            let mut active_mark: internal_mark::ActiveModel = existing.into();
            active_mark.semester = Set(values.semester);
            active_mark.subject = Set(values.subject.clone());
            active_mark.mid_exam1 = Set(values.mid_exam1);
            active_mark.mid_exam2 = Set(values.mid_exam2);
            active_mark.final_mid_exam = Set(values.final_mid_exam);
            active_mark.lab_internal = Set(values.lab_internal);
            active_mark.updated_at = Set(now);

            let updated = active_mark.update(self.db).await?;
            return Ok((updated, UpsertAction::Updated));
        }

        let new_mark = internal_mark::ActiveModel {
            internal_mark_id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            semester: Set(values.semester),
            subject: Set(values.subject.clone()),
            mid_exam1: Set(values.mid_exam1),
            mid_exam2: Set(values.mid_exam2),
            final_mid_exam: Set(values.final_mid_exam),
            lab_internal: Set(values.lab_internal),
            created_at: Set(now),
            updated_at: Set(now),
        };

        internal_mark::Entity::insert(new_mark)
            .on_conflict(
                OnConflict::columns([
                    internal_mark::Column::StudentId,
                    internal_mark::Column::Semester,
                    internal_mark::Column::Subject,
                ])
                .update_columns([
                    internal_mark::Column::MidExam1,
                    internal_mark::Column::MidExam2,
                    internal_mark::Column::FinalMidExam,
                    internal_mark::Column::LabInternal,
                    internal_mark::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        let inserted = self
            .find_by_natural_key(student_id, values.semester, &values.subject)
            .await?
            .ok_or_else(|| anyhow!("Internal mark missing right after insert"))?;

        Ok((inserted, UpsertAction::Inserted))
    }
}
