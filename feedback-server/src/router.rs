use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_HEADERS, AUTHORIZATION,
            CONTENT_TYPE,
        },
        HeaderMap, HeaderValue, StatusCode,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use feedback_core::{service::error::ServiceError, FeedbackCore};

#[cfg(test)]
mod test;

pub const TOKEN_PATH: &str = "/token";
pub const FEEDBACK_PATH: &str = "/feedback";

const ALLOWED_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";

pub fn router(core: Arc<FeedbackCore>) -> Router {
    Router::new()
        .route(TOKEN_PATH, get(create_token).options(preflight))
        .route(FEEDBACK_PATH, post(create_feedback).options(preflight))
        .layer(middleware::map_response(add_access_control_headers))
        .with_state(core)
}

async fn create_token(State(core): State<Arc<FeedbackCore>>, headers: HeaderMap) -> Response {
    match core.token_service.exchange(authorization(&headers)).await {
        Ok(session_token) => (
            [(CONTENT_TYPE, "text/plain")],
            String::from(session_token),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn create_feedback(
    State(core): State<Arc<FeedbackCore>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match core
        .feedback_service
        .submit_json(authorization(&headers), &body)
        .await
    {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => error_response(e),
    }
}

async fn preflight(headers: HeaderMap) -> impl IntoResponse {
    let allow_headers = headers
        .get(ACCESS_CONTROL_REQUEST_HEADERS)
        .cloned()
        .unwrap_or(HeaderValue::from_static(""));

    (
        StatusCode::NO_CONTENT,
        [
            (ACCESS_CONTROL_ALLOW_HEADERS, allow_headers),
            (
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            ),
        ],
    )
}

async fn add_access_control_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers
        .entry(ACCESS_CONTROL_ALLOW_HEADERS)
        .or_insert(HeaderValue::from_static("*"));

    response
}

fn authorization(headers: &HeaderMap) -> &str {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn error_response(error: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, error.to_string()).into_response()
}
