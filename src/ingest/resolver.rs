use sea_orm::ConnectionTrait;
use uuid::Uuid;

use super::error::RowError;
use super::parser::{
    FINAL_MID_EXAM, IngestRow, LAB_INTERNAL, MID_EXAM1, MID_EXAM2, SEMESTER, STUDENT_EMAIL,
    SUBJECT,
};
use crate::repositories::{
    InternalMarkRepository, InternalMarkValues, StudentRepository, UpsertAction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedRow {
    pub internal_mark_id: Uuid,
    pub student_id: Uuid,
    pub action: UpsertAction,
}

/// Applies one ingest row against the store: resolve the student by email,
/// parse the numeric fields, then update-or-insert the mark by
/// (student, semester, subject).
///
/// Callers run this inside a savepoint or transaction and roll it back when
/// an error comes out, so a failed row leaves nothing behind.
pub async fn apply_row<C: ConnectionTrait>(db: &C, row: &IngestRow) -> Result<AppliedRow, RowError> {
    let line = row.line();
    let email = require_cell(row, STUDENT_EMAIL)?;

    let student = StudentRepository::new(db)
        .find_by_email(email)
        .await
        .map_err(|e| unexpected(line, e))?
        .ok_or_else(|| RowError::StudentNotFound {
            email: email.to_string(),
        })?;

    let values = parse_mark_values(row)?;

    let (mark, action) = InternalMarkRepository::new(db)
        .upsert(student.student_id, &values)
        .await
        .map_err(|e| unexpected(line, e))?;

    Ok(AppliedRow {
        internal_mark_id: mark.internal_mark_id,
        student_id: student.student_id,
        action,
    })
}

/// Integer fields are parsed from the raw cell text; `subject` is kept
/// exactly as given.
pub fn parse_mark_values(row: &IngestRow) -> Result<InternalMarkValues, RowError> {
    Ok(InternalMarkValues {
        semester: parse_int(row, SEMESTER)?,
        subject: require_cell(row, SUBJECT)?.to_string(),
        mid_exam1: parse_int(row, MID_EXAM1)?,
        mid_exam2: parse_int(row, MID_EXAM2)?,
        final_mid_exam: parse_int(row, FINAL_MID_EXAM)?,
        lab_internal: parse_int(row, LAB_INTERNAL)?,
    })
}

/// Surrounding whitespace is ignored for numbers only (`" 80"` is 80).
fn parse_int(row: &IngestRow, field: &'static str) -> Result<i32, RowError> {
    let raw_value = row.get(field).unwrap_or_default();
    raw_value
        .trim()
        .parse::<i32>()
        .map_err(|_| RowError::FieldParseError {
            row: row.line(),
            field,
            raw_value: raw_value.to_string(),
        })
}

fn require_cell<'r>(row: &'r IngestRow, column: &str) -> Result<&'r str, RowError> {
    row.get(column).ok_or_else(|| RowError::UnexpectedRowError {
        row: row.line(),
        detail: format!("missing value for column {column}"),
    })
}

fn unexpected(line: u64, err: anyhow::Error) -> RowError {
    RowError::UnexpectedRowError {
        row: line,
        detail: format!("{err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::parser::parse_rows;

    const HEADER: &str =
        "student_email,semester,subject,mid_exam1,mid_exam2,final_mid_exam,lab_internal\n";

    fn first_row(body: &str) -> IngestRow {
        let content = format!("{HEADER}{body}");
        parse_rows(content.as_bytes())
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
    }

    #[test]
    fn parses_all_numeric_fields() {
        let values = parse_mark_values(&first_row("a@x.com,3,Physics,10,20,30,-4\n")).unwrap();
        assert_eq!(
            values,
            InternalMarkValues {
                semester: 3,
                subject: "Physics".to_string(),
                mid_exam1: 10,
                mid_exam2: 20,
                final_mid_exam: 30,
                lab_internal: -4,
            }
        );
    }

    #[test]
    fn non_integer_score_names_field_and_raw_value() {
        let err = parse_mark_values(&first_row("a@x.com,1,Math,80,eighty,90,15\n")).unwrap_err();
        assert_eq!(
            err,
            RowError::FieldParseError {
                row: 2,
                field: MID_EXAM2,
                raw_value: "eighty".to_string(),
            }
        );
    }

    #[test]
    fn padded_number_is_accepted_but_subject_is_kept_verbatim() {
        let values =
            parse_mark_values(&first_row("a@x.com, 1, Math , 80,85 ,\t90,15\n")).unwrap();
        assert_eq!(values.semester, 1);
        assert_eq!(values.subject, " Math ");
        assert_eq!(values.mid_exam1, 80);
        assert_eq!(values.mid_exam2, 85);
        assert_eq!(values.final_mid_exam, 90);
    }

    #[test]
    fn blank_or_inner_space_number_is_rejected() {
        let err = parse_mark_values(&first_row("a@x.com,1,Math,8 0,85,90,15\n")).unwrap_err();
        assert!(matches!(err, RowError::FieldParseError { field: MID_EXAM1, .. }));

        let err = parse_mark_values(&first_row("a@x.com,  ,Math,80,85,90,15\n")).unwrap_err();
        assert_eq!(
            err,
            RowError::FieldParseError {
                row: 2,
                field: SEMESTER,
                raw_value: "  ".to_string(),
            }
        );
    }

    #[test]
    fn missing_subject_cell_is_an_unexpected_row_error() {
        let err = parse_mark_values(&first_row("a@x.com,1\n")).unwrap_err();
        assert_eq!(
            err,
            RowError::UnexpectedRowError {
                row: 2,
                detail: "missing value for column subject".to_string(),
            }
        );
    }

    #[test]
    fn missing_trailing_cell_is_a_parse_error_with_empty_value() {
        let err = parse_mark_values(&first_row("a@x.com,1,Math,80,85,90\n")).unwrap_err();
        assert_eq!(
            err,
            RowError::FieldParseError {
                row: 2,
                field: LAB_INTERNAL,
                raw_value: String::new(),
            }
        );
    }

    #[test]
    fn user_message_names_the_student_email() {
        let err = parse_mark_values(&first_row("a@x.com,1,Math,x,85,90,15\n")).unwrap_err();
        assert_eq!(
            err.user_message("a@x.com"),
            "Error processing row for a@x.com: invalid integer value \"x\" for column mid_exam1 on line 2"
        );
    }
}
