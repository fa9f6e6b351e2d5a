use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use super::dto::{LoginRequest, LoginResponse};
use crate::config::JWT_EXPRIED_TIME;
use crate::repositories::UserRepository;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub fn create_route() -> Router<AppState> {
    Router::new().route("/api/v1/auth/login", post(login))
}

/// Login endpoint - returns JWT token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), (StatusCode, String)> {
    let user_repo = UserRepository::new(&state.db);

    let user_info = user_repo
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS.to_string()))?;

    let password_valid = bcrypt::verify(&payload.password, &user_info.password).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Password verification error: {}", e),
        )
    })?;

    if !password_valid {
        return Err((StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS.to_string()));
    }

    let token = state
        .jwt
        .create_jwt(
            &user_info.user_id.to_string(),
            &user_info.email,
            user_info.role,
            JWT_EXPRIED_TIME,
        )
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create token: {}", e),
            )
        })?;

    tracing::info!(user_id = %user_info.user_id, role = user_info.role.as_str(), "User logged in");

    let response = LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: JWT_EXPRIED_TIME,
        user_id: user_info.user_id.to_string(),
        email: user_info.email,
        role: user_info.role,
    };

    Ok((StatusCode::OK, Json(response)))
}
