use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;

use super::error::{IngestError, RowError, RowErrorKind};
use super::parser::{IngestRow, parse_rows};
use super::resolver::{AppliedRow, apply_row};
use crate::config::CommitMode;
use crate::repositories::UpsertAction;

const UNKNOWN_EMAIL: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub row: u64,
    pub email: String,
    pub kind: RowErrorKind,
    pub error: String,
}

/// Per-upload summary. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub total_records: usize,
    pub successful: usize,
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
    pub errors: Vec<RowFailure>,
}

impl BatchOutcome {
    pub fn record_success(&mut self, applied: &AppliedRow) {
        self.total_records += 1;
        self.successful += 1;
        match applied.action {
            UpsertAction::Inserted => self.inserted += 1,
            UpsertAction::Updated => self.updated += 1,
        }
    }

    pub fn record_failure(&mut self, row: &IngestRow, err: &RowError) {
        let email = row
            .student_email()
            .filter(|email| !email.is_empty())
            .unwrap_or(UNKNOWN_EMAIL)
            .to_string();

        tracing::warn!(line = row.line(), email = %email, "Skipping internal mark row: {}", err);

        self.total_records += 1;
        self.failed += 1;
        self.errors.push(RowFailure {
            row: row.line(),
            error: err.user_message(&email),
            kind: err.kind(),
            email,
        });
    }

    pub fn is_full_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn success_message(&self) -> String {
        format!(
            "{} internal mark record(s) uploaded/updated successfully.",
            self.successful
        )
    }

    /// Success line first, then one line per failed row in file order.
    pub fn messages(&self) -> Vec<String> {
        std::iter::once(self.success_message())
            .chain(self.errors.iter().map(|failure| failure.error.clone()))
            .collect()
    }
}

/// Runs a whole upload: parse, resolve every row in file order, commit
/// according to `mode`, report.
///
/// Row-level problems never abort the loop. Decoding problems and storage
/// failures outside a row (begin, savepoint release, final commit) do; in
/// `CommitMode::Batch` that discards every row of the upload.
pub async fn ingest_internal_marks(
    db: &DatabaseConnection,
    content: &[u8],
    mode: CommitMode,
) -> Result<BatchOutcome, IngestError> {
    let rows = parse_rows(content)?;
    let mut outcome = BatchOutcome::default();

    match mode {
        CommitMode::Batch => {
            let txn = db.begin().await?;

            for row in rows {
                let row = row?;
                let savepoint = txn.begin().await?;

                match apply_row(&savepoint, &row).await {
                    Ok(applied) => {
                        savepoint.commit().await?;
                        outcome.record_success(&applied);
                    }
                    Err(err) => {
                        savepoint.rollback().await?;
                        outcome.record_failure(&row, &err);
                    }
                }
            }

            txn.commit().await?;
        }
        CommitMode::PerRow => {
            for row in rows {
                let row = row?;
                let txn = db.begin().await?;

                match apply_row(&txn, &row).await {
                    Ok(applied) => match txn.commit().await {
                        Ok(()) => outcome.record_success(&applied),
                        Err(e) => outcome.record_failure(
                            &row,
                            &RowError::UnexpectedRowError {
                                row: row.line(),
                                detail: format!("commit failed: {e}"),
                            },
                        ),
                    },
                    Err(err) => {
                        txn.rollback().await?;
                        outcome.record_failure(&row, &err);
                    }
                }
            }
        }
    }

    tracing::info!(
        commit_mode = ?mode,
        total = outcome.total_records,
        successful = outcome.successful,
        inserted = outcome.inserted,
        updated = outcome.updated,
        failed = outcome.failed,
        "Internal marks upload processed"
    );

    Ok(outcome)
}
