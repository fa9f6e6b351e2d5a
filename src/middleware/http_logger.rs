use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use http::header;

use crate::state::AppState;

const REQUEST_ID: &str = "x-request-id";

/// One log line per request, keyed by the matched route so that
/// `/api/v1/teacher/students/{student_id}/internal-marks` groups across ids.
///
/// Bodies are never read here. Uploads log their own file name, size and
/// row counts from the handler.
pub async fn http_logger(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req.uri().path() == "/health" {
        return next.run(req).await;
    }

    let started = Instant::now();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let request_id = header_str(&req, REQUEST_ID).unwrap_or_default();
    let content_length = header_str(&req, header::CONTENT_LENGTH.as_str())
        .and_then(|len| len.parse::<u64>().ok());

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis();
    let app_env = state.settings.app_env.as_str();

    if response.status().is_server_error() {
        tracing::error!(
            %method,
            %route,
            status,
            latency_ms,
            request_id = %request_id,
            ?content_length,
            app_env,
            "HTTP request failed"
        );
    } else if response.status().is_client_error() {
        tracing::warn!(
            %method,
            %route,
            status,
            latency_ms,
            request_id = %request_id,
            ?content_length,
            app_env,
            "HTTP request rejected"
        );
    } else {
        tracing::info!(
            %method,
            %route,
            status,
            latency_ms,
            request_id = %request_id,
            ?content_length,
            app_env,
            "HTTP request completed"
        );
    }

    response
}

fn header_str(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
