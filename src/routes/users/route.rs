use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get},
};
use uuid::Uuid;

use super::dto::{DeleteUserResponse, UserListResponse, UserResponse};
use crate::extractor::AuthClaims;
use crate::middleware::permission::{AllowedRoles, require_role};
use crate::repositories::UserRepository;
use crate::state::AppState;

pub fn create_route(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/admin/users", get(get_all_users))
        .route("/api/v1/admin/users/{user_id}", delete(delete_user))
        .route_layer(middleware::from_fn_with_state(
            (state.clone(), AllowedRoles::ADMIN),
            require_role,
        ))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    responses(
        (status = 200, description = "All user accounts", body = UserListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_all_users(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<UserListResponse>), (StatusCode, String)> {
    let users = UserRepository::new(&state.db).find_all().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch users: {}", e),
        )
    })?;

    let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

    Ok((
        StatusCode::OK,
        Json(UserListResponse {
            total: users.len(),
            users,
        }),
    ))
}

/// Deletes an account together with the student profile linked to it and
/// that student's internal marks.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthClaims(auth_claims): AuthClaims,
    Path(user_id): Path<Uuid>,
) -> Result<(StatusCode, Json<DeleteUserResponse>), (StatusCode, String)> {
    let deleted = UserRepository::new(&state.db)
        .delete_account(user_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to delete user: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "User not found".to_string()))?;

    tracing::info!(
        admin_id = %auth_claims.sub,
        user_id = %deleted.user.user_id,
        student_id = ?deleted.student_id,
        "User deleted"
    );

    Ok((
        StatusCode::OK,
        Json(DeleteUserResponse {
            message: "User deleted successfully".to_string(),
            deleted_student_id: deleted.student_id,
        }),
    ))
}
