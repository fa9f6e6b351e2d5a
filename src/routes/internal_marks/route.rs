use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use http::header;
use uuid::Uuid;

use super::dto::{InternalMarkResponse, UploadInternalMarksResponse};
use crate::extractor::AuthClaims;
use crate::ingest::{IngestError, SAMPLE_CSV, check_upload, ingest_internal_marks};
use crate::middleware::permission::{AllowedRoles, require_role};
use crate::repositories::{InternalMarkRepository, StudentRepository};
use crate::state::AppState;
use crate::utils::upload::read_file_part;

pub const SAMPLE_FILE_NAME: &str = "internal_marks_sample.csv";

pub fn create_teacher_route(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/teacher/internal-marks/upload",
            post(upload_internal_marks),
        )
        .route(
            "/api/v1/teacher/internal-marks/sample",
            get(download_sample_csv),
        )
        .route_layer(middleware::from_fn_with_state(
            (state.clone(), AllowedRoles::TEACHER),
            require_role,
        ))
}

pub fn create_student_route(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/student/internal-marks", get(get_my_internal_marks))
        .route_layer(middleware::from_fn_with_state(
            (state.clone(), AllowedRoles::STUDENT),
            require_role,
        ))
}

fn ingest_error_response(err: IngestError) -> (StatusCode, String) {
    if err.is_rejection() {
        (StatusCode::BAD_REQUEST, err.to_string())
    } else {
        tracing::error!("Internal marks upload failed: {}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

/// Bulk upload of internal marks from a CSV file.
///
/// Rows are upserted by (student, semester, subject). Rows that fail are
/// reported back and skipped; every other row is stored.
#[utoipa::path(
    post,
    path = "/api/v1/teacher/internal-marks/upload",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload processed", body = UploadInternalMarksResponse),
        (status = 400, description = "Upload rejected before any row was processed"),
        (status = 413, description = "Upload larger than the configured limit"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Internal Marks"
)]
pub async fn upload_internal_marks(
    State(state): State<AppState>,
    AuthClaims(auth_claims): AuthClaims,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadInternalMarksResponse>), (StatusCode, String)> {
    let upload = read_file_part(multipart).await?;
    let upload = check_upload(upload).map_err(ingest_error_response)?;

    tracing::info!(
        user_id = %auth_claims.sub,
        file_name = %upload.file_name,
        size = upload.content.len(),
        "Processing internal marks upload"
    );

    let outcome = ingest_internal_marks(
        &state.db,
        &upload.content,
        state.settings.marks_commit_mode,
    )
    .await
    .map_err(ingest_error_response)?;

    tracing::info!(
        user_id = %auth_claims.sub,
        file_name = %upload.file_name,
        successful = outcome.successful,
        inserted = outcome.inserted,
        updated = outcome.updated,
        failed = outcome.failed,
        "Internal marks upload finished"
    );

    Ok((StatusCode::OK, Json(outcome.into())))
}

/// Download a sample CSV showing the expected header and two example rows.
#[utoipa::path(
    get,
    path = "/api/v1/teacher/internal-marks/sample",
    responses(
        (status = 200, description = "Sample CSV file", content_type = "text/csv", body = String),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Internal Marks"
)]
pub async fn download_sample_csv() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SAMPLE_FILE_NAME}\""),
            ),
        ],
        SAMPLE_CSV,
    )
}

/// Internal marks of the student linked to the caller's account.
#[utoipa::path(
    get,
    path = "/api/v1/student/internal-marks",
    responses(
        (status = 200, description = "Internal marks of the current student", body = Vec<InternalMarkResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No student profile linked to this account"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Internal Marks"
)]
pub async fn get_my_internal_marks(
    State(state): State<AppState>,
    AuthClaims(auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<Vec<InternalMarkResponse>>), (StatusCode, String)> {
    let user_id = Uuid::parse_str(&auth_claims.sub).map_err(|e| {
        (
            StatusCode::UNAUTHORIZED,
            format!("Invalid user_id in token: {}", e),
        )
    })?;

    let student = StudentRepository::new(&state.db)
        .find_by_user_id(user_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                "No student profile linked to this account".to_string(),
            )
        })?;

    let marks = InternalMarkRepository::new(&state.db)
        .find_by_student_id(student.student_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(marks.into_iter().map(InternalMarkResponse::from).collect()),
    ))
}
