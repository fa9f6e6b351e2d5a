use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use csv::{ReaderBuilder, StringRecordsIntoIter, Trim};

use super::error::IngestError;

pub const STUDENT_EMAIL: &str = "student_email";
pub const SEMESTER: &str = "semester";
pub const SUBJECT: &str = "subject";
pub const MID_EXAM1: &str = "mid_exam1";
pub const MID_EXAM2: &str = "mid_exam2";
pub const FINAL_MID_EXAM: &str = "final_mid_exam";
pub const LAB_INTERNAL: &str = "lab_internal";

pub const REQUIRED_COLUMNS: [&str; 7] = [
    STUDENT_EMAIL,
    SEMESTER,
    SUBJECT,
    MID_EXAM1,
    MID_EXAM2,
    FINAL_MID_EXAM,
    LAB_INTERNAL,
];

pub const CSV_EXTENSION: &str = ".csv";

/// Served by the sample-download endpoint, byte for byte.
pub const SAMPLE_CSV: &str = "student_email,semester,subject,mid_exam1,mid_exam2,final_mid_exam,lab_internal\n\
student1@example.com,1,Math,80,85,90,15\n\
student2@example.com,1,Science,75,70,80,12\n";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content: Bytes,
}

/// Pre-flight checks on the multipart file part, run before any parsing.
pub fn check_upload(upload: Option<UploadedFile>) -> Result<UploadedFile, IngestError> {
    let upload = upload.ok_or(IngestError::NoFile)?;

    if upload.file_name.is_empty() {
        return Err(IngestError::EmptyFileName);
    }

    // exact suffix match: `MARKS.CSV` is refused like any other extension
    if !upload.file_name.ends_with(CSV_EXTENSION) {
        return Err(IngestError::InvalidExtension {
            file_name: upload.file_name,
        });
    }

    Ok(upload)
}

/// One data line of the upload, keyed by header column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestRow {
    line: u64,
    cells: HashMap<String, String>,
}

impl IngestRow {
    /// Physical line number in the uploaded file (the header is line 1).
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn student_email(&self) -> Option<&str> {
        self.get(STUDENT_EMAIL)
    }
}

/// Lazy, single-pass sequence of rows over an upload's text.
pub struct IngestRows<'a> {
    headers: Arc<[String]>,
    records: StringRecordsIntoIter<&'a [u8]>,
}

impl Iterator for IngestRows<'_> {
    type Item = Result<IngestRow, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let cells = self
            .headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();

        Some(Ok(IngestRow { line, cells }))
    }
}

/// Decodes `content` as UTF-8 CSV with a header row. Cell values are passed
/// through untouched; type checks belong to the resolver.
pub fn parse_rows(content: &[u8]) -> Result<IngestRows<'_>, IngestError> {
    let text = std::str::from_utf8(content).map_err(IngestError::InvalidEncoding)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(text.as_bytes());

    let headers: Arc<[String]> = reader.headers()?.iter().map(str::to_string).collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing));
    }

    Ok(IngestRows {
        headers,
        records: reader.into_records(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content: &str) -> Option<UploadedFile> {
        Some(UploadedFile {
            file_name: name.to_string(),
            content: Bytes::from(content.to_string()),
        })
    }

    #[test]
    fn rejects_missing_file_part() {
        assert!(matches!(check_upload(None), Err(IngestError::NoFile)));
    }

    #[test]
    fn rejects_empty_file_name() {
        let result = check_upload(upload("", SAMPLE_CSV));
        assert!(matches!(result, Err(IngestError::EmptyFileName)));
    }

    #[test]
    fn rejects_non_csv_extension() {
        let result = check_upload(upload("marks.xlsx", SAMPLE_CSV));
        assert!(matches!(result, Err(IngestError::InvalidExtension { .. })));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid file type. Please upload a CSV file."
        );
    }

    #[test]
    fn rejects_upper_case_extension() {
        let result = check_upload(upload("MARKS.CSV", SAMPLE_CSV));
        assert!(matches!(
            result,
            Err(IngestError::InvalidExtension { ref file_name }) if file_name == "MARKS.CSV"
        ));
    }

    #[test]
    fn sample_parses_into_two_rows_in_file_order() {
        let rows: Vec<IngestRow> = parse_rows(SAMPLE_CSV.as_bytes())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].student_email(), Some("student1@example.com"));
        assert_eq!(rows[0].get(SUBJECT), Some("Math"));
        assert_eq!(rows[0].line(), 2);
        assert_eq!(rows[1].get(LAB_INTERNAL), Some("12"));
        assert_eq!(rows[1].line(), 3);
    }

    #[test]
    fn cells_are_not_trimmed() {
        let csv = "student_email,semester,subject,mid_exam1,mid_exam2,final_mid_exam,lab_internal\n\
                   a@x.com,1, Math ,1,2,3,4\n";
        let row = parse_rows(csv.as_bytes()).unwrap().next().unwrap().unwrap();
        assert_eq!(row.get(SUBJECT), Some(" Math "));
    }

    #[test]
    fn header_columns_may_be_reordered_and_extra_columns_ignored() {
        let csv = "subject,notes,lab_internal,final_mid_exam,mid_exam2,mid_exam1,semester,student_email\n\
                   Math,hello,4,3,2,1,2,a@x.com\n";
        let row = parse_rows(csv.as_bytes()).unwrap().next().unwrap().unwrap();
        assert_eq!(row.student_email(), Some("a@x.com"));
        assert_eq!(row.get(SEMESTER), Some("2"));
        assert_eq!(row.get(MID_EXAM1), Some("1"));
    }

    #[test]
    fn short_row_leaves_trailing_columns_absent() {
        let csv = "student_email,semester,subject,mid_exam1,mid_exam2,final_mid_exam,lab_internal\n\
                   a@x.com,1,Math\n";
        let row = parse_rows(csv.as_bytes()).unwrap().next().unwrap().unwrap();
        assert_eq!(row.get(SUBJECT), Some("Math"));
        assert_eq!(row.get(MID_EXAM1), None);
    }

    #[test]
    fn missing_required_columns_are_named() {
        let csv = "student_email,semester,subject\na@x.com,1,Math\n";
        match parse_rows(csv.as_bytes()) {
            Err(IngestError::MissingColumns(missing)) => assert_eq!(
                missing,
                vec![MID_EXAM1, MID_EXAM2, FINAL_MID_EXAM, LAB_INTERNAL]
            ),
            other => panic!("expected MissingColumns, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn invalid_utf8_is_fatal() {
        let mut content = SAMPLE_CSV.as_bytes().to_vec();
        content.extend_from_slice(&[0xff, 0xfe, b'\n']);
        assert!(matches!(
            parse_rows(&content),
            Err(IngestError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn leading_bom_is_ignored() {
        let content = format!("\u{feff}{SAMPLE_CSV}");
        assert_eq!(parse_rows(content.as_bytes()).unwrap().count(), 2);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let content = SAMPLE_CSV.replace('\n', "\r\n");
        let rows: Vec<IngestRow> = parse_rows(content.as_bytes())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rows[0].get(LAB_INTERNAL), Some("15"));
    }
}
