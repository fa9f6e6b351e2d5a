use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::internal_mark;
use crate::ingest::{BatchOutcome, RowErrorKind, RowFailure};

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadInternalMarksResponse {
    pub total_records: usize,
    pub successful: usize,
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
    pub errors: Vec<InternalMarkRowError>,
    /// Success line first, then one line per rejected row.
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InternalMarkRowError {
    /// Physical line in the uploaded file, header is line 1
    pub row: u64,
    pub email: String,
    pub kind: RowErrorKind,
    pub error: String,
}

impl From<RowFailure> for InternalMarkRowError {
    fn from(failure: RowFailure) -> Self {
        Self {
            row: failure.row,
            email: failure.email,
            kind: failure.kind,
            error: failure.error,
        }
    }
}

impl From<BatchOutcome> for UploadInternalMarksResponse {
    fn from(outcome: BatchOutcome) -> Self {
        let messages = outcome.messages();
        Self {
            total_records: outcome.total_records,
            successful: outcome.successful,
            inserted: outcome.inserted,
            updated: outcome.updated,
            failed: outcome.failed,
            errors: outcome.errors.into_iter().map(Into::into).collect(),
            messages,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InternalMarkResponse {
    pub internal_mark_id: Uuid,
    pub student_id: Uuid,
    pub semester: i32,
    pub subject: String,
    pub mid_exam1: i32,
    pub mid_exam2: i32,
    pub final_mid_exam: i32,
    pub lab_internal: i32,
    pub updated_at: NaiveDateTime,
}

impl From<internal_mark::Model> for InternalMarkResponse {
    fn from(mark: internal_mark::Model) -> Self {
        Self {
            internal_mark_id: mark.internal_mark_id,
            student_id: mark.student_id,
            semester: mark.semester,
            subject: mark.subject,
            mid_exam1: mark.mid_exam1,
            mid_exam2: mark.mid_exam2,
            final_mid_exam: mark.final_mid_exam,
            lab_internal: mark.lab_internal,
            updated_at: mark.updated_at,
        }
    }
}
