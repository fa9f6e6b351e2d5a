use axum::{extract::FromRequestParts, http::request::Parts};
use http::StatusCode;

use crate::utils::jwt::TokenClaims;

/// Claims placed on the request by `middleware::permission::require_role`.
/// Only usable on routes behind that middleware.
pub struct AuthClaims(pub TokenClaims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(AuthClaims)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    "Authentication required".to_string(),
                )
            })
    }
}
