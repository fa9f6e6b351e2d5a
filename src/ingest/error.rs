use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Failures that stop an upload as a whole. Everything except `Csv` and
/// `Storage` is raised before the first row is touched.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("No file part")]
    NoFile,

    #[error("No selected file")]
    EmptyFileName,

    #[error("Invalid file type. Please upload a CSV file.")]
    InvalidExtension { file_name: String },

    #[error("File is not valid UTF-8 text")]
    InvalidEncoding(#[source] std::str::Utf8Error),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Storage(#[from] DbErr),
}

impl IngestError {
    /// True when the upload was refused because of what was sent, as opposed
    /// to the server failing to store it.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, IngestError::Storage(_))
    }
}

/// A failure scoped to one CSV row. The batch always continues past it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Student with email {email} not found.")]
    StudentNotFound { email: String },

    /// A score or semester cell that is not an integer. A short row's
    /// missing numeric cell lands here with an empty `raw_value`.
    #[error("invalid integer value {raw_value:?} for column {field} on line {row}")]
    FieldParseError {
        row: u64,
        field: &'static str,
        raw_value: String,
    },

    /// Anything else: a missing `student_email` or `subject` cell, or a
    /// storage error while applying the row.
    #[error("{detail} (line {row})")]
    UnexpectedRowError { row: u64, detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RowErrorKind {
    StudentNotFound,
    FieldParseError,
    UnexpectedRowError,
}

impl RowError {
    pub fn kind(&self) -> RowErrorKind {
        match self {
            RowError::StudentNotFound { .. } => RowErrorKind::StudentNotFound,
            RowError::FieldParseError { .. } => RowErrorKind::FieldParseError,
            RowError::UnexpectedRowError { .. } => RowErrorKind::UnexpectedRowError,
        }
    }

    /// The line shown to the person who uploaded the file.
    pub fn user_message(&self, email: &str) -> String {
        match self {
            RowError::StudentNotFound { .. } => self.to_string(),
            _ => format!("Error processing row for {email}: {self}"),
        }
    }
}
