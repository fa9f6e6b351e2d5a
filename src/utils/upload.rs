use axum::extract::Multipart;
use http::StatusCode;

use crate::ingest::UploadedFile;

pub const FILE_FIELD: &str = "file";

fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Reads the `file` part of a multipart upload into memory.
///
/// Returns `Ok(None)` when the form has no such part; the caller decides what
/// that means. A part sent without a filename comes back with an empty
/// `file_name`. Bodies over the configured upload limit fail with 413.
pub async fn read_file_part(
    mut multipart: Multipart,
) -> Result<Option<UploadedFile>, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = sanitize_filename(field.file_name().unwrap_or_default());
        let content = field
            .bytes()
            .await
            .map_err(|e| (e.status(), format!("Failed to read file: {}", e)))?;

        return Ok(Some(UploadedFile { file_name, content }));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::sanitize_filename;

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize_filename("../marks/term1.csv"), ".._marks_term1.csv");
        assert_eq!(sanitize_filename("  marks.csv "), "marks.csv");
        assert_eq!(sanitize_filename(""), "");
    }
}
