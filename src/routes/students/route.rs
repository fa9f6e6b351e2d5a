use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::get,
};
use uuid::Uuid;

use super::dto::{StudentListResponse, StudentResponse};
use crate::middleware::permission::{AllowedRoles, require_role};
use crate::repositories::{InternalMarkRepository, StudentRepository};
use crate::routes::internal_marks::dto::InternalMarkResponse;
use crate::state::AppState;

pub fn create_route(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/teacher/students", get(get_all_students))
        .route(
            "/api/v1/teacher/students/{student_id}/internal-marks",
            get(get_student_internal_marks),
        )
        .route_layer(middleware::from_fn_with_state(
            (state.clone(), AllowedRoles::TEACHER),
            require_role,
        ))
}

#[utoipa::path(
    get,
    path = "/api/v1/teacher/students",
    responses(
        (status = 200, description = "All students", body = StudentListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_all_students(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<StudentListResponse>), (StatusCode, String)> {
    let students = StudentRepository::new(&state.db)
        .find_all()
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch students: {}", e),
            )
        })?;

    let students: Vec<StudentResponse> = students.into_iter().map(Into::into).collect();

    Ok((
        StatusCode::OK,
        Json(StudentListResponse {
            total: students.len(),
            students,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/teacher/students/{student_id}/internal-marks",
    params(
        ("student_id" = Uuid, Path, description = "Student id")
    ),
    responses(
        (status = 200, description = "Internal marks of the student", body = Vec<InternalMarkResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_student_internal_marks(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<InternalMarkResponse>>), (StatusCode, String)> {
    StudentRepository::new(&state.db)
        .find_by_id(student_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Student not found".to_string()))?;

    let marks = InternalMarkRepository::new(&state.db)
        .find_by_student_id(student_id)
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
