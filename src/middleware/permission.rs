use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use http::StatusCode;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::state::AppState;
use crate::utils::jwt::TokenClaims;

pub const PERMISSION_DENIED: &str = "You do not have permission to access this page.";

/// Roles allowed through a guarded router.
#[derive(Debug, Clone, Copy)]
pub struct AllowedRoles(pub &'static [RoleEnum]);

impl AllowedRoles {
    pub const ADMIN: Self = Self(&[RoleEnum::Admin]);
    pub const TEACHER: Self = Self(&[RoleEnum::Teacher]);
    pub const STUDENT: Self = Self(&[RoleEnum::Student]);

    pub fn permits(&self, role: RoleEnum) -> bool {
        self.0.contains(&role)
    }
}

/// Checks the bearer token and the caller's role, then hands the decoded
/// claims to the handler through request extensions.
///
/// Applied per router:
///
/// ```ignore
/// router.route_layer(middleware::from_fn_with_state(
///     (state.clone(), AllowedRoles::TEACHER),
///     require_role,
/// ))
/// ```
pub async fn require_role(
    State((state, allowed)): State<(AppState, AllowedRoles)>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            "Missing bearer token".to_string(),
        )
    })?;

    let claims = state.jwt.decode_jwt(bearer.token()).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            "Invalid or expired token".to_string(),
        )
    })?;

    check_role(&claims, allowed)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

pub fn check_role(claims: &TokenClaims, allowed: AllowedRoles) -> Result<(), (StatusCode, String)> {
    if allowed.permits(claims.role) {
        return Ok(());
    }

    tracing::info!(
        user_id = %claims.sub,
        role = claims.role.as_str(),
        "Role not allowed for route"
    );
    Err((StatusCode::FORBIDDEN, PERMISSION_DENIED.to_string()))
}
