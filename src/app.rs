use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, middleware};
use http::{HeaderName, HeaderValue, Method, header};
use tower::ServiceBuilder;
use tower_http::{
    ServiceBuilderExt,
    cors::{AllowOrigin, Any, CorsLayer},
    propagate_header::PropagateHeaderLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_docs::ApiDoc;
use crate::middleware::http_logger::http_logger;
use crate::routes;
use crate::state::{AppSettings, AppState};

/// Builds the full HTTP application around `state`.
pub fn create_app(state: AppState) -> anyhow::Result<Router> {
    let settings = state.settings.clone();

    let mut router = Router::new()
        .merge(routes::health::create_route())
        .merge(routes::auth::create_route())
        .merge(routes::internal_marks::create_teacher_route(&state))
        .merge(routes::internal_marks::create_student_route(&state))
        .merge(routes::students::create_route(&state))
        .merge(routes::users::create_route(&state))
        .with_state(state.clone());

    if settings.swagger_enabled {
        router = router.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    let sensitive_headers: Arc<[HeaderName]> = Arc::new([header::AUTHORIZATION, header::COOKIE]);

    let stack = ServiceBuilder::new()
        .layer(cors_layer(&settings))
        .layer(PropagateHeaderLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .sensitive_request_headers(sensitive_headers.clone())
        .sensitive_response_headers(sensitive_headers)
        .compression();

    // from_fn middleware is layered on the router, not through ServiceBuilder
    Ok(router
        .layer(middleware::from_fn_with_state(state, http_logger))
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
        .layer(stack))
}

/// `*` allows any origin without credentials; otherwise a comma-separated
/// origin list is allowed with credentials.
fn cors_layer(settings: &AppSettings) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    if settings.cors_allowed_origins.trim() == "*" {
        return cors.allow_origin(Any).allow_credentials(false);
    }

    let mut origins: Vec<HeaderValue> = settings
        .cors_allowed_origins
        .split(',')
        .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
        .collect();
    origins.dedup();

    cors.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}
